//! Reusable empty state messages with actionable hints

use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Builder for empty state messages
pub struct EmptyState {
    title: String,
    message: Vec<String>,
    actions: Vec<(String, String)>,
}

impl EmptyState {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn message(mut self, msg: impl Into<String>) -> Self {
        self.message.push(msg.into());
        self
    }

    pub fn action(mut self, key: impl Into<String>, description: impl Into<String>) -> Self {
        self.actions.push((key.into(), description.into()));
        self
    }

    pub fn build(self) -> Paragraph<'static> {
        let mut lines = Vec::new();

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            self.title,
            Style::default().fg(Color::Yellow),
        )));
        lines.push(Line::from(""));

        for msg in self.message {
            lines.push(Line::from(Span::styled(
                msg,
                Style::default().fg(Color::DarkGray),
            )));
        }

        if !self.actions.is_empty() {
            lines.push(Line::from(""));
            for (key, desc) in self.actions {
                lines.push(Line::from(vec![
                    Span::styled("  [", Style::default().fg(Color::DarkGray)),
                    Span::styled(key, Style::default().fg(Color::Green)),
                    Span::styled("] ", Style::default().fg(Color::DarkGray)),
                    Span::styled(desc, Style::default().fg(Color::White)),
                ]));
            }
        }

        Paragraph::new(lines).alignment(Alignment::Center)
    }
}

pub fn no_projects() -> Paragraph<'static> {
    EmptyState::new("No Projects Tracked")
        .message("The demo dataset is disabled and nothing is tracked yet")
        .message("")
        .message("Run without --no-demo-data to explore the sample business")
        .action("r", "Refresh")
        .build()
}

pub fn no_communications() -> Paragraph<'static> {
    EmptyState::new("No Communications Yet")
        .message("Messages appear here when a project changes status")
        .message("")
        .message("Move a project forward from the Projects tab")
        .action("s", "Advance selected project (Projects tab)")
        .build()
}

pub fn no_templates() -> Paragraph<'static> {
    EmptyState::new("No Templates Found")
        .message("Built-in templates failed to register")
        .message("")
        .message("Custom templates load from the configured templates_dir")
        .action("r", "Refresh")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_predefined_states() {
        let _state = EmptyState::new("Test Title")
            .message("Test message")
            .action("r", "Refresh")
            .build();

        let _ = no_projects();
        let _ = no_communications();
        let _ = no_templates();
    }
}
