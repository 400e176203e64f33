//! Dashboard tab - business overview with stat cards, revenue sparkline
//! and per-project progress

use gigboard_core::analytics::AnalyticsData;
use gigboard_core::config::ColorScheme;
use gigboard_core::progress::normalize_percent;
use gigboard_core::store::DashboardSnapshot;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Sparkline},
    Frame,
};

use crate::components::render_progress_gauge;
use crate::empty_state;
use crate::theme::{BaseColors, ProjectStatusColor, StatusColor, TrendColor};

/// Dashboard tab state
pub struct DashboardTab;

impl DashboardTab {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        snapshot: &DashboardSnapshot,
        analytics: &AnalyticsData,
        scheme: ColorScheme,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(7), // Stat cards row
                Constraint::Length(9), // Revenue sparkline
                Constraint::Min(8),    // Project progress + service mix
            ])
            .split(area);

        self.render_stats_row(frame, chunks[0], snapshot, analytics, scheme);
        self.render_revenue(frame, chunks[1], snapshot, analytics, scheme);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(chunks[2]);

        self.render_project_progress(frame, bottom[0], snapshot, scheme);
        self.render_service_mix(frame, bottom[1], analytics, scheme);
    }

    fn render_stats_row(
        &self,
        frame: &mut Frame,
        area: Rect,
        snapshot: &DashboardSnapshot,
        analytics: &AnalyticsData,
        scheme: ColorScheme,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
                Constraint::Percentage(20),
            ])
            .split(area);

        let stats = &snapshot.stats;
        let currency = snapshot.currency.as_str();

        let revenue_value = format!("{}{}", currency, fmt_amount(stats.total_revenue));
        let trend_subtitle = format!("{}", analytics.revenue_trend);

        self.render_stat_card(
            frame,
            chunks[0],
            "$ Revenue",
            &revenue_value,
            StatusColor::Success.to_color(scheme),
            &trend_subtitle,
            TrendColor(analytics.revenue_trend.direction).to_color(scheme),
            scheme,
        );
        self.render_stat_card(
            frame,
            chunks[1],
            "● Active",
            &stats.active_projects.to_string(),
            StatusColor::Warning.to_color(scheme),
            "projects",
            BaseColors::muted(scheme),
            scheme,
        );
        self.render_stat_card(
            frame,
            chunks[2],
            "✓ Completed",
            &stats.completed_projects.to_string(),
            StatusColor::Success.to_color(scheme),
            "delivered",
            BaseColors::muted(scheme),
            scheme,
        );
        self.render_stat_card(
            frame,
            chunks[3],
            "◆ Clients",
            &stats.total_clients.to_string(),
            StatusColor::Focus.to_color(scheme),
            &format!("{}% retention", stats.client_retention),
            BaseColors::muted(scheme),
            scheme,
        );
        self.render_stat_card(
            frame,
            chunks[4],
            "★ Satisfaction",
            &format!("{}%", stats.satisfaction_rate),
            StatusColor::Important.to_color(scheme),
            &format!("responds in {}", stats.response_display()),
            BaseColors::muted(scheme),
            scheme,
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn render_stat_card(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        value: &str,
        color: Color,
        subtitle: &str,
        subtitle_color: Color,
        scheme: ColorScheme,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BaseColors::muted(scheme)))
            .title(Span::styled(
                format!(" {} ", title),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let inner_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // top padding
                Constraint::Length(2), // value
                Constraint::Length(1), // subtitle
                Constraint::Min(0),
            ])
            .split(inner);

        let value_widget = Paragraph::new(Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(value_widget, inner_chunks[1]);

        let subtitle_widget = Paragraph::new(Line::from(Span::styled(
            subtitle.to_string(),
            Style::default().fg(subtitle_color),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(subtitle_widget, inner_chunks[2]);
    }

    fn render_revenue(
        &self,
        frame: &mut Frame,
        area: Rect,
        snapshot: &DashboardSnapshot,
        analytics: &AnalyticsData,
        scheme: ColorScheme,
    ) {
        let title = match &analytics.best_month {
            Some(best) => format!(
                " ≡ Monthly Revenue (best: {} {}{:.0}) ",
                best.month, snapshot.currency, best.revenue
            ),
            None => " ≡ Monthly Revenue ".to_string(),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BaseColors::muted(scheme)))
            .title(Span::styled(
                title,
                Style::default()
                    .fg(BaseColors::fg(scheme))
                    .add_modifier(Modifier::BOLD),
            ));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if snapshot.revenue.is_empty() {
            let placeholder = Paragraph::new("No revenue history")
                .style(Style::default().fg(BaseColors::muted(scheme)))
                .alignment(Alignment::Center);
            frame.render_widget(placeholder, inner);
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(inner);

        let values: Vec<u64> = snapshot.revenue.iter().map(|p| p.revenue as u64).collect();
        let sparkline = Sparkline::default()
            .data(&values)
            .style(Style::default().fg(StatusColor::Success.to_color(scheme)));
        frame.render_widget(sparkline, rows[0]);

        let labels = snapshot
            .revenue
            .iter()
            .map(|p| p.month.as_str())
            .collect::<Vec<_>>()
            .join("  ");
        let label_row = Paragraph::new(Line::from(Span::styled(
            labels,
            Style::default().fg(BaseColors::muted(scheme)),
        )));
        frame.render_widget(label_row, rows[1]);
    }

    fn render_project_progress(
        &self,
        frame: &mut Frame,
        area: Rect,
        snapshot: &DashboardSnapshot,
        scheme: ColorScheme,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BaseColors::muted(scheme)))
            .title(Span::styled(
                " ▶ Project Progress ",
                Style::default()
                    .fg(BaseColors::fg(scheme))
                    .add_modifier(Modifier::BOLD),
            ));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if snapshot.projects.is_empty() {
            frame.render_widget(empty_state::no_projects(), inner);
            return;
        }

        // Two rows per project: name line + gauge
        let mut constraints = Vec::new();
        for _ in &snapshot.projects {
            constraints.push(Constraint::Length(1));
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Min(0));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (i, project) in snapshot.projects.iter().enumerate() {
            let status = ProjectStatusColor(project.status);
            let name_line = Line::from(vec![
                Span::styled(
                    format!(" {} ", status.icon()),
                    Style::default().fg(ProjectStatusColor(project.status).to_color(scheme)),
                ),
                Span::styled(
                    project.title.clone(),
                    Style::default().fg(BaseColors::fg(scheme)),
                ),
                Span::styled(
                    format!("  ({})", project.client),
                    Style::default().fg(BaseColors::muted(scheme)),
                ),
            ]);
            frame.render_widget(Paragraph::new(name_line), rows[i * 2]);

            let normalized = normalize_percent(Some(project.progress as f64), false);
            let gauge_area = rows[i * 2 + 1].inner(ratatui::layout::Margin {
                horizontal: 1,
                vertical: 0,
            });
            render_progress_gauge(frame, gauge_area, &normalized, scheme);
        }
    }

    fn render_service_mix(
        &self,
        frame: &mut Frame,
        area: Rect,
        analytics: &AnalyticsData,
        scheme: ColorScheme,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BaseColors::muted(scheme)))
            .title(Span::styled(
                " ◔ Service Mix ",
                Style::default()
                    .fg(BaseColors::fg(scheme))
                    .add_modifier(Modifier::BOLD),
            ));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![Line::from("")];
        for slice in &analytics.service_mix {
            let bar_width = (slice.share as usize) / 5;
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {:<18}", slice.name),
                    Style::default().fg(BaseColors::fg(scheme)),
                ),
                Span::styled(
                    "█".repeat(bar_width),
                    Style::default().fg(StatusColor::Focus.to_color(scheme)),
                ),
                Span::styled(
                    format!(" {}%", slice.share),
                    Style::default().fg(BaseColors::muted(scheme)),
                ),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Default for DashboardTab {
    fn default() -> Self {
        Self::new()
    }
}

/// Format an amount with thousands separators for card display
fn fmt_amount(amount: f64) -> String {
    let whole = amount.round() as i64;
    let raw = whole.abs().to_string();
    let mut out = String::new();
    for (i, c) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if whole < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_amount() {
        assert_eq!(fmt_amount(0.0), "0");
        assert_eq!(fmt_amount(950.0), "950");
        assert_eq!(fmt_amount(12450.0), "12,450");
        assert_eq!(fmt_amount(1234567.0), "1,234,567");
        assert_eq!(fmt_amount(-4200.0), "-4,200");
    }
}
