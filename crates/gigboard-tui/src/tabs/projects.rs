//! Projects tab - filterable project list + detail view

use chrono::Utc;
use crossterm::event::KeyCode;
use gigboard_core::config::ColorScheme;
use gigboard_core::models::{PackageTier, Project, ProjectStatus};
use gigboard_core::progress::normalize_percent;
use gigboard_core::store::DashboardSnapshot;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use std::sync::Arc;

use crate::app::App;
use crate::components::render_progress_gauge;
use crate::empty_state;
use crate::theme::{
    BaseColors, DueDateColor, ProjectStatusColor, StatusColor, TierColor,
};

/// Projects tab state
pub struct ProjectsTab {
    list_state: ListState,
    /// None shows every project
    filter: Option<ProjectStatus>,
}

impl Default for ProjectsTab {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectsTab {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            list_state,
            filter: None,
        }
    }

    pub fn filter_label(&self) -> &'static str {
        match self.filter {
            None => "All",
            Some(status) => status.label(),
        }
    }

    fn visible<'a>(&self, projects: &'a [Arc<Project>]) -> Vec<&'a Arc<Project>> {
        projects
            .iter()
            .filter(|p| self.filter.map_or(true, |f| p.status == f))
            .collect()
    }

    fn selected_id(&self, projects: &[Arc<Project>]) -> Option<u32> {
        let visible = self.visible(projects);
        self.list_state
            .selected()
            .and_then(|i| visible.get(i))
            .map(|p| p.id)
    }

    /// Handle key input for this tab
    pub fn handle_key(&mut self, key: KeyCode, app: &mut App) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1, app),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1, app),
            KeyCode::Char('f') => {
                self.cycle_filter();
                self.list_state.select(Some(0));
            }
            KeyCode::Char('s') => self.advance_selected(app),
            _ => {}
        }
    }

    fn move_selection(&mut self, delta: i32, app: &App) {
        let len = self.visible(&app.store.projects()).len();
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as i32;
        let new_idx = (current + delta).clamp(0, len as i32 - 1) as usize;
        self.list_state.select(Some(new_idx));
    }

    fn cycle_filter(&mut self) {
        self.filter = match self.filter {
            None => Some(ProjectStatus::Pending),
            Some(ProjectStatus::Pending) => Some(ProjectStatus::Active),
            Some(ProjectStatus::Active) => Some(ProjectStatus::InProgress),
            Some(ProjectStatus::InProgress) => Some(ProjectStatus::Completed),
            Some(ProjectStatus::Completed) => None,
        };
    }

    fn advance_selected(&self, app: &mut App) {
        let projects = app.store.projects();
        let Some(id) = self.selected_id(&projects) else {
            return;
        };

        match app.store.advance_project_status(id) {
            Ok(Some(kind)) => {
                let client = app
                    .store
                    .get_project(id)
                    .map(|p| p.client.clone())
                    .unwrap_or_default();
                app.toasts.success(format!("{} sent to {}", kind, client));
            }
            Ok(None) => {
                app.toasts.info("Project is already completed");
            }
            Err(err) => {
                app.toasts.error(format!("Status change failed: {}", err));
            }
        }
    }

    /// Render the projects tab
    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        snapshot: &DashboardSnapshot,
        scheme: ColorScheme,
    ) {
        let visible = self.visible(&snapshot.projects);

        // Clamp selection after filter changes or data refresh
        if let Some(sel) = self.list_state.selected() {
            if sel >= visible.len() && !visible.is_empty() {
                self.list_state.select(Some(visible.len() - 1));
            }
        }

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        self.render_list(frame, chunks[0], &visible, snapshot, scheme);

        let selected = self.list_state.selected().and_then(|i| visible.get(i));
        self.render_detail(frame, chunks[1], selected.copied(), snapshot, scheme);
    }

    fn render_list(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        visible: &[&Arc<Project>],
        snapshot: &DashboardSnapshot,
        scheme: ColorScheme,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(StatusColor::Focus.to_color(scheme)))
            .title(Span::styled(
                format!(
                    " ■ Projects ({}) [filter: {}] ",
                    visible.len(),
                    self.filter_label()
                ),
                Style::default()
                    .fg(BaseColors::fg(scheme))
                    .add_modifier(Modifier::BOLD),
            ));

        if visible.is_empty() {
            frame.render_widget(empty_state::no_projects().block(block), area);
            return;
        }

        let today = Utc::now().date_naive();
        let items: Vec<ListItem> = visible
            .iter()
            .enumerate()
            .map(|(i, project)| {
                let is_selected = self.list_state.selected() == Some(i);
                let status = ProjectStatusColor(project.status);
                let days_left = project.days_until_due(today);
                let due_color =
                    DueDateColor::from_days_left(days_left, project.is_open()).to_color(scheme);

                let title_style = if is_selected {
                    Style::default()
                        .fg(StatusColor::Focus.to_color(scheme))
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(BaseColors::fg(scheme))
                };

                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!(" {} ", if is_selected { "▶" } else { " " }),
                        title_style,
                    ),
                    Span::styled(
                        format!("{} ", status.icon()),
                        Style::default().fg(ProjectStatusColor(project.status).to_color(scheme)),
                    ),
                    Span::styled(format!("{:<32} ", truncate(&project.title, 30)), title_style),
                    Span::styled(
                        format!("{:<12} ", truncate(&project.client, 12)),
                        Style::default().fg(BaseColors::muted(scheme)),
                    ),
                    Span::styled(
                        project.due_date.format("%m/%d").to_string(),
                        Style::default().fg(due_color),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(BaseColors::selection_bg(scheme))
                .add_modifier(Modifier::BOLD),
        );

        frame.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_detail(
        &self,
        frame: &mut Frame,
        area: Rect,
        project: Option<&Arc<Project>>,
        snapshot: &DashboardSnapshot,
        scheme: ColorScheme,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BaseColors::muted(scheme)))
            .title(Span::styled(
                " Detail ",
                Style::default()
                    .fg(BaseColors::fg(scheme))
                    .add_modifier(Modifier::BOLD),
            ));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(project) = project else {
            let empty = Paragraph::new("No project selected")
                .style(Style::default().fg(BaseColors::muted(scheme)));
            frame.render_widget(empty, inner);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(9), // facts
                Constraint::Length(1), // gauge
                Constraint::Min(3),    // recent communications
            ])
            .split(inner);

        let muted = Style::default().fg(BaseColors::muted(scheme));
        let fg = Style::default().fg(BaseColors::fg(scheme));
        let today = Utc::now().date_naive();
        let days_left = project.days_until_due(today);
        let due_line = if !project.is_open() {
            "delivered".to_string()
        } else if days_left < 0 {
            format!("{} days overdue", -days_left)
        } else {
            format!("{} days left", days_left)
        };
        let tier = PackageTier::parse_lenient(&project.package_type);

        let facts = vec![
            Line::from(vec![
                Span::styled("Title:   ", muted),
                Span::styled(project.title.clone(), fg.add_modifier(Modifier::BOLD)),
            ]),
            Line::from(vec![
                Span::styled("Client:  ", muted),
                Span::styled(project.client.clone(), fg),
            ]),
            Line::from(vec![
                Span::styled("Type:    ", muted),
                Span::styled(project.project_type.clone(), fg),
            ]),
            Line::from(vec![
                Span::styled("Package: ", muted),
                Span::styled(
                    project.package_type.clone(),
                    Style::default().fg(TierColor(tier).to_color(scheme)),
                ),
            ]),
            Line::from(vec![
                Span::styled("Status:  ", muted),
                Span::styled(
                    format!(
                        "{} {}",
                        ProjectStatusColor(project.status).icon(),
                        project.status
                    ),
                    Style::default().fg(ProjectStatusColor(project.status).to_color(scheme)),
                ),
            ]),
            Line::from(vec![
                Span::styled("Due:     ", muted),
                Span::styled(
                    format!("{} ({})", project.due_date.format("%Y-%m-%d"), due_line),
                    Style::default().fg(
                        DueDateColor::from_days_left(days_left, project.is_open())
                            .to_color(scheme),
                    ),
                ),
            ]),
            Line::from(vec![
                Span::styled("Price:   ", muted),
                Span::styled(
                    format!("{}{:.0}", snapshot.currency, project.price),
                    Style::default().fg(StatusColor::Success.to_color(scheme)),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled("Progress:", muted)),
        ];
        frame.render_widget(Paragraph::new(facts), chunks[0]);

        let normalized = normalize_percent(Some(project.progress as f64), false);
        render_progress_gauge(frame, chunks[1], &normalized, scheme);

        let mut comm_lines = vec![
            Line::from(""),
            Line::from(Span::styled("Recent messages:", muted)),
        ];
        let recent: Vec<_> = snapshot
            .communications
            .iter()
            .filter(|c| c.project_id == project.id)
            .take(3)
            .collect();
        if recent.is_empty() {
            comm_lines.push(Line::from(Span::styled("  none yet", muted)));
        }
        for comm in recent {
            comm_lines.push(Line::from(vec![
                Span::styled(
                    format!("  {} ", comm.sent_at.format("%m/%d")),
                    Style::default().fg(StatusColor::Warning.to_color(scheme)),
                ),
                Span::styled(truncate(&comm.subject, 40), fg),
            ]));
        }
        frame.render_widget(
            Paragraph::new(comm_lines).wrap(Wrap { trim: false }),
            chunks[2],
        );
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    let truncated: String = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        format!("{}...", truncated)
    } else {
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_cycle_covers_all_statuses() {
        let mut tab = ProjectsTab::new();
        assert_eq!(tab.filter, None);

        let mut seen = Vec::new();
        for _ in 0..4 {
            tab.cycle_filter();
            seen.push(tab.filter);
        }
        assert_eq!(
            seen,
            vec![
                Some(ProjectStatus::Pending),
                Some(ProjectStatus::Active),
                Some(ProjectStatus::InProgress),
                Some(ProjectStatus::Completed),
            ]
        );

        tab.cycle_filter();
        assert_eq!(tab.filter, None);
    }

    #[test]
    fn test_visible_respects_filter() {
        let projects: Vec<Arc<Project>> = gigboard_core::sample::sample_data()
            .projects
            .into_iter()
            .map(Arc::new)
            .collect();

        let mut tab = ProjectsTab::new();
        assert_eq!(tab.visible(&projects).len(), 4);

        tab.filter = Some(ProjectStatus::Completed);
        let completed = tab.visible(&projects);
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id, 2);
    }

    #[test]
    fn test_selected_id_tracks_filtered_list() {
        let projects: Vec<Arc<Project>> = gigboard_core::sample::sample_data()
            .projects
            .into_iter()
            .map(Arc::new)
            .collect();

        let mut tab = ProjectsTab::new();
        tab.filter = Some(ProjectStatus::Pending);
        assert_eq!(tab.selected_id(&projects), Some(4));
    }

    #[test]
    fn test_truncate_keeps_short_strings() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer title here", 10), "a much lon...");
    }
}
