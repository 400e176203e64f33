//! Toast notifications for automation results and load warnings

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

const MAX_VISIBLE: usize = 4;
const TOAST_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Warning,
    Error,
    Info,
}

impl ToastKind {
    pub fn color(&self) -> Color {
        match self {
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
            Self::Info => Color::Cyan,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Warning => "⚠",
            Self::Error => "✗",
            Self::Info => "ℹ",
        }
    }
}

/// Single toast message
#[derive(Debug, Clone)]
struct Toast {
    message: String,
    kind: ToastKind,
    created_at: Instant,
    duration: Duration,
}

impl Toast {
    fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }
}

/// Owns the live toasts and renders them stacked above the status bar
#[derive(Debug, Default)]
pub struct ToastManager {
    toasts: VecDeque<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) {
        let duration = match kind {
            // Errors stay up long enough to read
            ToastKind::Error | ToastKind::Warning => Duration::from_secs(5),
            _ => Duration::from_secs(3),
        };
        self.toasts.push_back(Toast {
            message: message.into(),
            kind,
            created_at: Instant::now(),
            duration,
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Info, message);
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.toasts.retain(|t| !t.is_expired());

        if self.toasts.is_empty() {
            return;
        }

        let visible: Vec<&Toast> = self
            .toasts
            .iter()
            .rev()
            .take(MAX_VISIBLE)
            .rev()
            .collect();

        let mut y_offset = area
            .height
            .saturating_sub(visible.len() as u16 * TOAST_HEIGHT + 2);

        for toast in visible {
            let width = (toast.message.chars().count() + 6).min(area.width as usize) as u16;
            let x_offset = area.width.saturating_sub(width) / 2;

            let toast_area = Rect {
                x: area.x + x_offset,
                y: area.y + y_offset,
                width,
                height: TOAST_HEIGHT,
            };

            let color = toast.kind.color();
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color));

            let inner = block.inner(toast_area);
            frame.render_widget(block, toast_area);

            let content = Line::from(vec![
                Span::styled(
                    format!("{} ", toast.kind.icon()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(toast.message.as_str()),
            ]);

            frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), inner);

            y_offset += TOAST_HEIGHT;
        }
    }
}
