//! Automation tab - communications log + scheduled follow-ups
//!
//! Left/right or h/l moves focus between the log and the follow-up
//! list; 'd' completes the selected follow-up.

use chrono::Utc;
use crossterm::event::KeyCode;
use gigboard_core::automation::AutomationSummary;
use gigboard_core::config::ColorScheme;
use gigboard_core::models::{Communication, FollowUp};
use gigboard_core::store::DashboardSnapshot;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::empty_state;
use crate::theme::{BaseColors, CommunicationKindColor, StatusColor};

const FOCUS_LOG: usize = 0;
const FOCUS_FOLLOW_UPS: usize = 1;

/// Automation tab state
pub struct AutomationTab {
    log_state: ListState,
    follow_up_state: ListState,
    focus: usize,
}

impl Default for AutomationTab {
    fn default() -> Self {
        Self::new()
    }
}

impl AutomationTab {
    pub fn new() -> Self {
        let mut log_state = ListState::default();
        log_state.select(Some(0));
        let mut follow_up_state = ListState::default();
        follow_up_state.select(Some(0));
        Self {
            log_state,
            follow_up_state,
            focus: FOCUS_LOG,
        }
    }

    /// Handle key input for this tab
    pub fn handle_key(&mut self, key: KeyCode, app: &mut App) {
        match key {
            KeyCode::Left | KeyCode::Char('h') => self.focus = FOCUS_LOG,
            KeyCode::Right | KeyCode::Char('l') => self.focus = FOCUS_FOLLOW_UPS,
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1, app),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1, app),
            KeyCode::Char('d') => self.complete_selected_follow_up(app),
            _ => {}
        }
    }

    fn move_selection(&mut self, delta: i32, app: &App) {
        let (state, len) = match self.focus {
            FOCUS_FOLLOW_UPS => (&mut self.follow_up_state, app.store.follow_ups().len()),
            _ => (&mut self.log_state, app.store.communications().len()),
        };
        if len == 0 {
            return;
        }
        let current = state.selected().unwrap_or(0) as i32;
        let new_idx = (current + delta).clamp(0, len as i32 - 1) as usize;
        state.select(Some(new_idx));
    }

    fn complete_selected_follow_up(&self, app: &mut App) {
        if self.focus != FOCUS_FOLLOW_UPS {
            return;
        }
        let follow_ups = app.store.follow_ups();
        let Some(entry) = self
            .follow_up_state
            .selected()
            .and_then(|i| follow_ups.get(i))
        else {
            return;
        };

        if app.store.complete_follow_up(entry.project_id) {
            app.toasts
                .success(format!("Follow-up for '{}' done", entry.project_title));
        } else {
            app.toasts.info("No open follow-up for that project");
        }
    }

    /// Render the automation tab
    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        snapshot: &DashboardSnapshot,
        summary: &AutomationSummary,
        scheme: ColorScheme,
    ) {
        self.clamp(&snapshot.communications, &snapshot.follow_ups);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // summary cards
                Constraint::Min(8),    // log + preview
                Constraint::Length(8), // follow-ups
            ])
            .split(area);

        self.render_summary(frame, chunks[0], summary, scheme);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);

        self.render_log(frame, middle[0], &snapshot.communications, scheme);

        let selected = self
            .log_state
            .selected()
            .and_then(|i| snapshot.communications.get(i));
        self.render_preview(frame, middle[1], selected, scheme);

        self.render_follow_ups(frame, chunks[2], &snapshot.follow_ups, scheme);
    }

    fn clamp(&mut self, communications: &[Communication], follow_ups: &[FollowUp]) {
        if let Some(sel) = self.log_state.selected() {
            if sel >= communications.len() && !communications.is_empty() {
                self.log_state.select(Some(communications.len() - 1));
            }
        }
        if let Some(sel) = self.follow_up_state.selected() {
            if sel >= follow_ups.len() && !follow_ups.is_empty() {
                self.follow_up_state.select(Some(follow_ups.len() - 1));
            }
        }
    }

    fn render_summary(
        &self,
        frame: &mut Frame,
        area: Rect,
        summary: &AutomationSummary,
        scheme: ColorScheme,
    ) {
        let cards: [(&str, String, StatusColor); 3] = [
            (
                "✉ Email Automation",
                format!("{} sent / {} rules", summary.messages_sent, summary.active_rules),
                StatusColor::Success,
            ),
            (
                "⚙ Report Generation",
                format!("{} generated", summary.reports_generated),
                StatusColor::Important,
            ),
            (
                "⚑ Task Scheduling",
                if summary.due_follow_ups > 0 {
                    format!(
                        "{} open ({} due)",
                        summary.open_follow_ups, summary.due_follow_ups
                    )
                } else {
                    format!("{} open", summary.open_follow_ups)
                },
                if summary.due_follow_ups > 0 {
                    StatusColor::Warning
                } else {
                    StatusColor::Steady
                },
            ),
        ];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(34),
                Constraint::Percentage(33),
                Constraint::Percentage(33),
            ])
            .split(area);

        for (i, (title, value, color)) in cards.iter().enumerate() {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(BaseColors::muted(scheme)))
                .title(Span::styled(
                    format!(" {} ", title),
                    Style::default()
                        .fg(color.to_color(scheme))
                        .add_modifier(Modifier::BOLD),
                ));
            let inner = block.inner(columns[i]);
            frame.render_widget(block, columns[i]);

            let value_widget = Paragraph::new(Line::from(Span::styled(
                value.clone(),
                Style::default()
                    .fg(color.to_color(scheme))
                    .add_modifier(Modifier::BOLD),
            )))
            .alignment(ratatui::layout::Alignment::Center);
            frame.render_widget(value_widget, inner);
        }
    }

    fn render_log(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        communications: &[Communication],
        scheme: ColorScheme,
    ) {
        let focused = self.focus == FOCUS_LOG;
        let border = if focused {
            StatusColor::Focus.to_color(scheme)
        } else {
            BaseColors::muted(scheme)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(
                format!(" ✉ Communications ({}) ", communications.len()),
                Style::default()
                    .fg(BaseColors::fg(scheme))
                    .add_modifier(Modifier::BOLD),
            ));

        if communications.is_empty() {
            frame.render_widget(empty_state::no_communications().block(block), area);
            return;
        }

        let items: Vec<ListItem> = communications
            .iter()
            .enumerate()
            .map(|(i, comm)| {
                let is_selected = self.log_state.selected() == Some(i);
                let subject_style = if is_selected && focused {
                    Style::default()
                        .fg(StatusColor::Focus.to_color(scheme))
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(BaseColors::fg(scheme))
                };

                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!(" {} ", if is_selected { "▶" } else { " " }),
                        subject_style,
                    ),
                    Span::styled(
                        format!("{} ", comm.sent_at.format("%m/%d %H:%M")),
                        Style::default().fg(StatusColor::Warning.to_color(scheme)),
                    ),
                    Span::styled(
                        format!("{:<22} ", comm.kind.label()),
                        Style::default().fg(CommunicationKindColor(comm.kind).to_color(scheme)),
                    ),
                    Span::styled(truncate(&comm.client, 14), subject_style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(BaseColors::selection_bg(scheme))
                .add_modifier(Modifier::BOLD),
        );

        frame.render_stateful_widget(list, area, &mut self.log_state);
    }

    fn render_preview(
        &self,
        frame: &mut Frame,
        area: Rect,
        communication: Option<&Communication>,
        scheme: ColorScheme,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BaseColors::muted(scheme)))
            .title(Span::styled(
                " Message ",
                Style::default()
                    .fg(BaseColors::fg(scheme))
                    .add_modifier(Modifier::BOLD),
            ));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(comm) = communication else {
            let empty = Paragraph::new("No message selected")
                .style(Style::default().fg(BaseColors::muted(scheme)));
            frame.render_widget(empty, inner);
            return;
        };

        let muted = Style::default().fg(BaseColors::muted(scheme));
        let fg = Style::default().fg(BaseColors::fg(scheme));

        let mut lines = vec![
            Line::from(vec![
                Span::styled("To:      ", muted),
                Span::styled(comm.client.clone(), fg),
            ]),
            Line::from(vec![
                Span::styled("Project: ", muted),
                Span::styled(comm.project_title.clone(), fg),
            ]),
            Line::from(vec![
                Span::styled("Subject: ", muted),
                Span::styled(
                    comm.subject.clone(),
                    Style::default()
                        .fg(StatusColor::Warning.to_color(scheme))
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];
        for raw in comm.body.lines() {
            lines.push(Line::from(Span::styled(raw.to_string(), fg)));
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }

    fn render_follow_ups(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        follow_ups: &[FollowUp],
        scheme: ColorScheme,
    ) {
        let focused = self.focus == FOCUS_FOLLOW_UPS;
        let border = if focused {
            StatusColor::Focus.to_color(scheme)
        } else {
            BaseColors::muted(scheme)
        };

        let open = follow_ups.iter().filter(|f| !f.done).count();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(
                format!(" ⚑ Follow-ups ({} open, d: done) ", open),
                Style::default()
                    .fg(BaseColors::fg(scheme))
                    .add_modifier(Modifier::BOLD),
            ));

        if follow_ups.is_empty() {
            let empty = Paragraph::new("Nothing scheduled. Delivering a project adds one.")
                .block(block)
                .style(Style::default().fg(BaseColors::muted(scheme)));
            frame.render_widget(empty, area);
            return;
        }

        let today = Utc::now().date_naive();
        let items: Vec<ListItem> = follow_ups
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let is_selected = self.follow_up_state.selected() == Some(i);
                let (icon, color) = if entry.done {
                    ("✓", StatusColor::Neutral)
                } else if entry.is_due(today) {
                    ("!", StatusColor::Error)
                } else {
                    ("○", StatusColor::Steady)
                };

                let text_style = if entry.done {
                    Style::default().fg(BaseColors::muted(scheme))
                } else if is_selected && focused {
                    Style::default()
                        .fg(StatusColor::Focus.to_color(scheme))
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(BaseColors::fg(scheme))
                };

                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!(" {} ", if is_selected { "▶" } else { " " }),
                        text_style,
                    ),
                    Span::styled(
                        format!("{} ", icon),
                        Style::default().fg(color.to_color(scheme)),
                    ),
                    Span::styled(format!("{:<36} ", truncate(&entry.project_title, 34)), text_style),
                    Span::styled(
                        format!("due {}", entry.due.format("%Y-%m-%d")),
                        Style::default().fg(color.to_color(scheme)),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(BaseColors::selection_bg(scheme))
                .add_modifier(Modifier::BOLD),
        );

        frame.render_stateful_widget(list, area, &mut self.follow_up_state);
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
