//! Templates tab - template library + rendered preview
//!
//! The preview substitutes representative values from the live data so
//! the copy action ('y') puts a ready-to-send message on the clipboard.

use crossterm::event::KeyCode;
use gigboard_core::config::ColorScheme;
use gigboard_core::models::{MessageTemplate, ProjectStatus};
use gigboard_core::store::DashboardSnapshot;
use gigboard_core::templates::{substitute, TemplateVars};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::empty_state;
use crate::theme::{BaseColors, StatusColor};

/// Templates tab state
pub struct TemplatesTab {
    list_state: ListState,
}

impl Default for TemplatesTab {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplatesTab {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self { list_state }
    }

    fn selected_template(&self, templates: &[MessageTemplate]) -> Option<MessageTemplate> {
        self.list_state
            .selected()
            .and_then(|i| templates.get(i))
            .cloned()
    }

    /// Handle key input for this tab
    pub fn handle_key(&mut self, key: KeyCode, app: &mut App) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1, app),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1, app),
            KeyCode::Char('y') => self.copy_selected(app),
            _ => {}
        }
    }

    fn move_selection(&mut self, delta: i32, app: &App) {
        let len = app.store.templates().len();
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as i32;
        let new_idx = (current + delta).clamp(0, len as i32 - 1) as usize;
        self.list_state.select(Some(new_idx));
    }

    /// Render the selected template with live values and put it on the
    /// system clipboard. Rendering through the store bumps usage counts.
    fn copy_selected(&self, app: &mut App) {
        let templates = app.store.templates().all();
        let Some(template) = self.selected_template(&templates) else {
            return;
        };

        let vars = preview_vars(&app.store.snapshot());
        let rendered = match app.store.render_template(&template.id, &vars) {
            Ok(rendered) => rendered,
            Err(err) => {
                app.toasts.error(format!("Render failed: {}", err));
                return;
            }
        };

        let text = format!("Subject: {}\n\n{}", rendered.subject, rendered.body);
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text)) {
            Ok(()) => app
                .toasts
                .success(format!("Copied '{}' to clipboard", template.name)),
            Err(err) => app
                .toasts
                .error(format!("Clipboard unavailable: {}", err)),
        }
    }

    /// Render the templates tab
    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        snapshot: &DashboardSnapshot,
        templates: &[MessageTemplate],
        scheme: ColorScheme,
    ) {
        if let Some(sel) = self.list_state.selected() {
            if sel >= templates.len() && !templates.is_empty() {
                self.list_state.select(Some(templates.len() - 1));
            }
        }

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        self.render_list(frame, chunks[0], templates, scheme);

        let selected = self.list_state.selected().and_then(|i| templates.get(i));
        self.render_preview(frame, chunks[1], selected, snapshot, scheme);
    }

    fn render_list(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        templates: &[MessageTemplate],
        scheme: ColorScheme,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(StatusColor::Focus.to_color(scheme)))
            .title(Span::styled(
                format!(" ✉ Templates ({}) ", templates.len()),
                Style::default()
                    .fg(BaseColors::fg(scheme))
                    .add_modifier(Modifier::BOLD),
            ));

        if templates.is_empty() {
            frame.render_widget(empty_state::no_templates().block(block), area);
            return;
        }

        let items: Vec<ListItem> = templates
            .iter()
            .enumerate()
            .map(|(i, template)| {
                let is_selected = self.list_state.selected() == Some(i);
                let name_style = if is_selected {
                    Style::default()
                        .fg(StatusColor::Focus.to_color(scheme))
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(BaseColors::fg(scheme))
                };

                let origin = if template.builtin { "" } else { "◇ " };

                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!(" {} ", if is_selected { "▶" } else { " " }),
                        name_style,
                    ),
                    Span::styled(format!("{}{:<24} ", origin, template.name), name_style),
                    Span::styled(
                        format!("{:<14} ", template.category.label()),
                        Style::default().fg(StatusColor::Important.to_color(scheme)),
                    ),
                    Span::styled(
                        format!("{}×", template.usage_count),
                        Style::default().fg(BaseColors::muted(scheme)),
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

    fn render_preview(
        &self,
        frame: &mut Frame,
        area: Rect,
        template: Option<&MessageTemplate>,
        snapshot: &DashboardSnapshot,
        scheme: ColorScheme,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BaseColors::muted(scheme)))
            .title(Span::styled(
                " Preview (y: copy) ",
                Style::default()
                    .fg(BaseColors::fg(scheme))
                    .add_modifier(Modifier::BOLD),
            ));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(template) = template else {
            let empty = Paragraph::new("No template selected")
                .style(Style::default().fg(BaseColors::muted(scheme)));
            frame.render_widget(empty, inner);
            return;
        };

        let vars = preview_vars(snapshot);
        let subject = substitute(&template.subject, &vars);
        let body = substitute(&template.body, &vars);

        let muted = Style::default().fg(BaseColors::muted(scheme));
        let fg = Style::default().fg(BaseColors::fg(scheme));

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Subject: ", muted),
                Span::styled(
                    subject,
                    Style::default()
                        .fg(StatusColor::Warning.to_color(scheme))
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];
        for raw in body.lines() {
            lines.push(Line::from(Span::styled(raw.to_string(), fg)));
        }

        let preview = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(preview, inner);
    }
}

/// Representative values for every placeholder the built-in templates
/// use, taken from the first open project when there is one
fn preview_vars(snapshot: &DashboardSnapshot) -> TemplateVars {
    let project = snapshot
        .projects
        .iter()
        .find(|p| p.is_open())
        .or_else(|| snapshot.projects.first());

    let service_type = snapshot
        .profile
        .service_type
        .clone()
        .or_else(|| project.map(|p| p.project_type.clone()))
        .unwrap_or_else(|| "Market Research".to_string());

    let mut vars = TemplateVars::new()
        .with("seller_name", snapshot.profile.seller_name.as_str())
        .with("service_type", service_type.as_str())
        .with("current_task", "Data analysis and insights generation")
        .with(
            "next_steps",
            "• Final review\n• Report assembly\n• Delivery walkthrough",
        )
        .with(
            "deliverables_list",
            "• Full report (PDF)\n• Data files (Excel/CSV)\n• Executive summary\n• Recommendations",
        )
        .with(
            "key_findings",
            "Key insights and actionable recommendations included",
        );

    match project {
        Some(p) => {
            vars.set("client_name", p.client.as_str());
            vars.set("project_title", p.title.as_str());
            vars.set("project_type", p.project_type.as_str());
            vars.set("package_type", p.package_type.as_str());
            vars.set("due_date", p.due_date.format("%Y-%m-%d").to_string());
            vars.set("progress_percentage", p.progress.to_string());
        }
        None => {
            vars.set("client_name", "your client");
            vars.set("project_title", "your project");
            vars.set("project_type", service_type);
            vars.set("package_type", "Standard");
            vars.set("due_date", "TBD");
            vars.set("progress_percentage", "50");
        }
    }

    vars
}

#[cfg(test)]
mod tests {
    use super::*;
    use gigboard_core::templates::unresolved_placeholder;
    use gigboard_core::{DataStore, DataStoreConfig};

    fn snapshot() -> DashboardSnapshot {
        let store = DataStore::new(DataStoreConfig::default());
        store.load();
        store.snapshot()
    }

    #[test]
    fn test_preview_vars_use_first_open_project() {
        let snap = snapshot();
        let vars = preview_vars(&snap);
        // Project 1 is the first open project in the demo data
        assert_eq!(vars.get("client_name"), Some("TechStart Inc."));
        assert_eq!(vars.get("progress_percentage"), Some("75"));
    }

    #[test]
    fn test_preview_vars_cover_every_builtin_placeholder() {
        let snap = snapshot();
        let vars = preview_vars(&snap);

        for template in gigboard_core::TemplateStore::with_builtins().all() {
            let text = format!(
                "{}\n{}",
                substitute(&template.subject, &vars),
                substitute(&template.body, &vars)
            );
            assert_eq!(
                unresolved_placeholder(&text),
                None,
                "placeholder left in {}",
                template.id
            );
        }
    }

    #[test]
    fn test_preview_vars_without_projects() {
        let store = DataStore::new(DataStoreConfig {
            seed_demo_data: false,
            ..DataStoreConfig::default()
        });
        store.load();
        let vars = preview_vars(&store.snapshot());
        assert_eq!(vars.get("client_name"), Some("your client"));
    }

    #[test]
    fn test_completed_projects_still_preview_when_nothing_open() {
        let store = DataStore::with_defaults();
        store.load();
        for id in [1, 3, 4] {
            while store
                .advance_project_status(id)
                .expect("demo project advances")
                .is_some()
            {}
        }

        let vars = preview_vars(&store.snapshot());
        // Falls back to the first project even though all are closed
        assert_eq!(vars.get("client_name"), Some("TechStart Inc."));
    }
}
