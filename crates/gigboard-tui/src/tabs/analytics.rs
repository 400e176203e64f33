//! Analytics tab - revenue trend, completion and pipeline breakdowns

use gigboard_core::analytics::AnalyticsData;
use gigboard_core::config::ColorScheme;
use gigboard_core::store::DashboardSnapshot;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Paragraph},
    Frame,
};

use crate::theme::{BaseColors, ProjectStatusColor, StatusColor, TrendColor};

/// Analytics tab state
pub struct AnalyticsTab;

impl Default for AnalyticsTab {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsTab {
    pub fn new() -> Self {
        Self
    }

    /// Render the analytics tab
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
                Constraint::Length(7), // Metric cards
                Constraint::Length(12), // Revenue bar chart
                Constraint::Min(7),    // Distribution + service mix
            ])
            .split(area);

        self.render_metric_cards(frame, chunks[0], snapshot, analytics, scheme);
        self.render_revenue_chart(frame, chunks[1], snapshot, analytics, scheme);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);

        self.render_status_distribution(frame, bottom[0], analytics, scheme);
        self.render_service_mix(frame, bottom[1], analytics, scheme);
    }

    fn render_metric_cards(
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
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(area);

        let currency = snapshot.currency.as_str();

        self.render_stat_card(
            frame,
            chunks[0],
            "$ Revenue",
            &format!("{}{:.0}", currency, analytics.total_revenue),
            StatusColor::Success.to_color(scheme),
            &format!("{}", analytics.revenue_trend),
            TrendColor(analytics.revenue_trend.direction).to_color(scheme),
            scheme,
        );
        self.render_stat_card(
            frame,
            chunks[1],
            "✓ Completion",
            &format!("{:.0}%", analytics.completion_rate),
            StatusColor::Steady.to_color(scheme),
            "of all projects",
            BaseColors::muted(scheme),
            scheme,
        );
        self.render_stat_card(
            frame,
            chunks[2],
            "◆ Avg Value",
            &format!("{}{:.0}", currency, analytics.avg_project_value),
            StatusColor::Focus.to_color(scheme),
            "per completed",
            BaseColors::muted(scheme),
            scheme,
        );
        self.render_stat_card(
            frame,
            chunks[3],
            "◎ Pipeline",
            &format!("{}{:.0}", currency, analytics.pipeline_value),
            StatusColor::Important.to_color(scheme),
            "open projects",
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

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                value.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                subtitle.to_string(),
                Style::default().fg(subtitle_color),
            )),
        ];

        let para = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(para, area);
    }

    fn render_revenue_chart(
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

        if analytics.monthly_revenue.is_empty() {
            let placeholder = Paragraph::new("No revenue history")
                .block(block)
                .style(Style::default().fg(BaseColors::muted(scheme)))
                .alignment(Alignment::Center);
            frame.render_widget(placeholder, area);
            return;
        }

        let bars: Vec<(&str, u64)> = analytics
            .monthly_revenue
            .iter()
            .map(|p| (p.month.as_str(), p.revenue as u64))
            .collect();

        let chart = BarChart::default()
            .block(block)
            .data(bars.as_slice())
            .bar_width(5)
            .bar_gap(2)
            .bar_style(Style::default().fg(StatusColor::Success.to_color(scheme)))
            .value_style(
                Style::default()
                    .fg(BaseColors::fg(scheme))
                    .add_modifier(Modifier::BOLD),
            )
            .label_style(Style::default().fg(BaseColors::muted(scheme)));

        frame.render_widget(chart, area);
    }

    fn render_status_distribution(
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
                " ▶ Status Breakdown ",
                Style::default()
                    .fg(BaseColors::fg(scheme))
                    .add_modifier(Modifier::BOLD),
            ));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let total: usize = analytics
            .status_distribution
            .iter()
            .map(|(_, count)| count)
            .sum();

        let mut lines = vec![Line::from("")];
        for (status, count) in &analytics.status_distribution {
            let color = ProjectStatusColor(*status).to_color(scheme);
            let pct = if total == 0 {
                0
            } else {
                (count * 100) / total
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {} {:<12}", ProjectStatusColor(*status).icon(), status.label()),
                    Style::default().fg(color),
                ),
                Span::styled("■".repeat(*count), Style::default().fg(color)),
                Span::styled(
                    format!(" {} ({}%)", count, pct),
                    Style::default().fg(BaseColors::muted(scheme)),
                ),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), inner);
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
            let bar_width = (slice.share as usize) / 4;
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
