//! Animated spinner for the loading screen

use ratatui::{
    style::{Color, Style},
    text::Span,
};
use std::time::{Duration, Instant};

const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const FRAME_DURATION: Duration = Duration::from_millis(80);

/// Braille spinner, advanced by calling `tick` on each render
#[derive(Debug)]
pub struct Spinner {
    current_frame: usize,
    last_update: Instant,
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spinner {
    pub fn new() -> Self {
        Self {
            current_frame: 0,
            last_update: Instant::now(),
        }
    }

    /// Advance the animation if enough time has passed
    pub fn tick(&mut self) {
        let now = Instant::now();
        if now.duration_since(self.last_update) >= FRAME_DURATION {
            self.current_frame = (self.current_frame + 1) % FRAMES.len();
            self.last_update = now;
        }
    }

    /// Current frame as a styled span
    pub fn render(&self) -> Span<'static> {
        Span::styled(
            FRAMES[self.current_frame],
            Style::default().fg(Color::Cyan),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_stays_in_bounds() {
        let mut spinner = Spinner::new();
        for _ in 0..25 {
            spinner.tick();
            assert!(spinner.current_frame < FRAMES.len());
        }
    }
}
