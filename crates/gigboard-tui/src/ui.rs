//! TUI rendering logic

use crate::app::{App, Tab};
use crate::tabs::{AnalyticsTab, AutomationTab, DashboardTab, ProjectsTab, TemplatesTab};
use chrono::Utc;
use gigboard_core::analytics::AnalyticsData;
use gigboard_core::automation::AutomationSummary;
use gigboard_core::store::DashboardSnapshot;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::theme::{BaseColors, StatusColor};

/// Main UI renderer
pub struct Ui {
    dashboard: DashboardTab,
    projects: ProjectsTab,
    templates: TemplatesTab,
    automation: AutomationTab,
    analytics: AnalyticsTab,

    /// Data view refreshed when the store publishes a change
    snapshot: Option<DashboardSnapshot>,
    analytics_data: AnalyticsData,
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}

impl Ui {
    pub fn new() -> Self {
        Self {
            dashboard: DashboardTab::new(),
            projects: ProjectsTab::new(),
            templates: TemplatesTab::new(),
            automation: AutomationTab::new(),
            analytics: AnalyticsTab::new(),
            snapshot: None,
            analytics_data: AnalyticsData::empty(),
        }
    }

    /// Handle key input for the active tab
    pub fn handle_tab_key(&mut self, key: crossterm::event::KeyCode, app: &mut App) {
        match app.active_tab {
            Tab::Dashboard => {
                // Dashboard is read-only
            }
            Tab::Projects => self.projects.handle_key(key, app),
            Tab::Templates => self.templates.handle_key(key, app),
            Tab::Automation => self.automation.handle_key(key, app),
            Tab::Analytics => {
                // Analytics is read-only
            }
        }
    }

    /// Render the full UI
    pub fn render(&mut self, frame: &mut Frame, app: &mut App) {
        let size = frame.area();

        if app.is_loading {
            self.render_loading_screen(frame, size, app);
            app.toasts.render(frame, size);
            return;
        }

        if app.needs_refresh || self.snapshot.is_none() {
            self.refresh_data(app);
            app.needs_refresh = false;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header + tab bar
                Constraint::Min(0),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(size);

        self.render_header(frame, chunks[0], app.active_tab, app);
        self.render_tab_content(frame, chunks[1], app);
        self.render_status_bar(frame, chunks[2], app);

        // Toast notifications overlay everything
        app.toasts.render(frame, size);
    }

    fn refresh_data(&mut self, app: &App) {
        let snapshot = app.store.snapshot();
        self.analytics_data = AnalyticsData::compute(
            &snapshot.stats,
            &snapshot.revenue,
            &snapshot.projects,
            &snapshot.service_mix,
        );
        self.snapshot = Some(snapshot);
    }

    fn render_loading_screen(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        app.spinner.tick();

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Length(7),
                Constraint::Percentage(40),
            ])
            .split(area);

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(40),
                Constraint::Percentage(30),
            ])
            .split(vertical[1]);

        let loading_area = horizontal[1];
        let scheme = app.color_scheme;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(StatusColor::Focus.to_color(scheme)))
            .title(Span::styled(
                " gigboard ",
                Style::default()
                    .fg(StatusColor::Focus.to_color(scheme))
                    .add_modifier(Modifier::BOLD),
            ));

        let inner = block.inner(loading_area);
        frame.render_widget(block, loading_area);

        let inner_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let spinner_line = Line::from(vec![
            Span::raw("  "),
            app.spinner.render(),
            Span::raw("  "),
            Span::styled(
                "Loading your business data...",
                Style::default().fg(BaseColors::fg(scheme)),
            ),
        ]);
        frame.render_widget(Paragraph::new(spinner_line), inner_chunks[2]);

        let hint = Paragraph::new(Line::from(Span::styled(
            "Press 'q' to quit",
            Style::default().fg(BaseColors::muted(scheme)),
        )))
        .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(hint, inner_chunks[4]);
    }

    fn render_header(&mut self, frame: &mut Frame, area: Rect, active: Tab, app: &App) {
        let scheme = app.color_scheme;

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(BaseColors::muted(scheme)));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let tab_bar_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(13), // Logo
                Constraint::Min(0),     // Tabs
            ])
            .split(inner);

        let logo = Paragraph::new(Line::from(vec![
            Span::styled(
                "◈ ",
                Style::default().fg(StatusColor::Focus.to_color(scheme)),
            ),
            Span::styled(
                "gigboard",
                Style::default()
                    .fg(BaseColors::fg(scheme))
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        frame.render_widget(logo, tab_bar_chunks[0]);

        let titles: Vec<Line> = Tab::all()
            .iter()
            .map(|t| {
                let style = if *t == active {
                    Style::default()
                        .fg(StatusColor::Focus.to_color(scheme))
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                } else {
                    Style::default().fg(BaseColors::muted(scheme))
                };
                Line::from(Span::styled(
                    format!(" {} {} {} ", t.icon(), t.shortcut(), t.name()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles).select(active.index()).divider(Span::styled(
            "│",
            Style::default().fg(BaseColors::muted(scheme)),
        ));
        frame.render_widget(tabs, tab_bar_chunks[1]);
    }

    fn render_tab_content(&mut self, frame: &mut Frame, area: Rect, app: &App) {
        let scheme = app.color_scheme;
        let Some(snapshot) = &self.snapshot else {
            return;
        };

        match app.active_tab {
            Tab::Dashboard => {
                self.dashboard
                    .render(frame, area, snapshot, &self.analytics_data, scheme);
            }
            Tab::Projects => {
                self.projects.render(frame, area, snapshot, scheme);
            }
            Tab::Templates => {
                let templates = app.store.templates().all();
                self.templates
                    .render(frame, area, snapshot, &templates, scheme);
            }
            Tab::Automation => {
                let summary = AutomationSummary::compute(
                    &snapshot.communications,
                    &snapshot.follow_ups,
                    app.store.templates().len(),
                    app.store.reports_generated(),
                    Utc::now().date_naive(),
                );
                self.automation
                    .render(frame, area, snapshot, &summary, scheme);
            }
            Tab::Analytics => {
                self.analytics
                    .render(frame, area, snapshot, &self.analytics_data, scheme);
            }
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect, app: &App) {
        let scheme = app.color_scheme;
        let muted = Style::default().fg(BaseColors::muted(scheme));
        let key_style = Style::default()
            .fg(StatusColor::Focus.to_color(scheme))
            .add_modifier(Modifier::BOLD);

        let hint = match app.active_tab {
            Tab::Dashboard => "1-5 jump to tab",
            Tab::Projects => "j/k select │ s advance status │ f filter",
            Tab::Templates => "j/k select │ y copy to clipboard",
            Tab::Automation => "h/l focus pane │ j/k select │ d mark done",
            Tab::Analytics => "r refresh",
        };

        let status = Line::from(vec![
            Span::styled(
                format!(" ◆ {} projects ", app.store.project_count()),
                muted,
            ),
            Span::styled("│", muted),
            Span::styled(" q", key_style),
            Span::styled(" quit ", muted),
            Span::styled("│", muted),
            Span::styled(" t", key_style),
            Span::styled(" theme ", muted),
            Span::styled("│", muted),
            Span::styled(format!(" {}", hint), muted),
        ]);

        let bar =
            Paragraph::new(status).style(Style::default().bg(BaseColors::selection_bg(scheme)));
        frame.render_widget(bar, area);
    }
}
