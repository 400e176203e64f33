//! Progress gauge fed by the normalized progress values

use gigboard_core::config::ColorScheme;
use gigboard_core::Normalized;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Span,
    widgets::Gauge,
    Frame,
};

use crate::theme::{BaseColors, ProgressLevelColor};

/// Render one progress bar. An indeterminate value shows the loading
/// label over an empty track instead of a fill percentage.
pub fn render_progress_gauge(
    frame: &mut Frame,
    area: Rect,
    normalized: &Normalized,
    scheme: ColorScheme,
) {
    let (percent, color) = if normalized.is_indeterminate() {
        (0, BaseColors::muted(scheme))
    } else {
        let percent = normalized.percent_u16();
        (
            percent,
            ProgressLevelColor::from_percentage(percent).to_color(scheme),
        )
    };

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .percent(percent)
        .label(Span::styled(
            normalized.display_text.clone(),
            Style::default().fg(BaseColors::fg(scheme)),
        ));

    frame.render_widget(gauge, area);
}
