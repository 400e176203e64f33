//! TUI application state and global key handling

use gigboard_core::config::ColorScheme;
use gigboard_core::error::LoadSummary;
use gigboard_core::preferences::UiPreferences;
use gigboard_core::{DataEvent, DataStore};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::warn;

use crate::components::{Spinner, ToastManager};

/// Active tab in the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    Projects,
    Templates,
    Automation,
    Analytics,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[
            Tab::Dashboard,
            Tab::Projects,
            Tab::Templates,
            Tab::Automation,
            Tab::Analytics,
        ]
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Dashboard => 0,
            Tab::Projects => 1,
            Tab::Templates => 2,
            Tab::Automation => 3,
            Tab::Analytics => 4,
        }
    }

    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Tab::Dashboard,
            1 => Tab::Projects,
            2 => Tab::Templates,
            3 => Tab::Automation,
            4 => Tab::Analytics,
            _ => Tab::Dashboard,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Projects => "Projects",
            Tab::Templates => "Templates",
            Tab::Automation => "Automation",
            Tab::Analytics => "Analytics",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Tab::Dashboard => "◆",
            Tab::Projects => "■",
            Tab::Templates => "✉",
            Tab::Automation => "⚙",
            Tab::Analytics => "≡",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            Tab::Dashboard => '1',
            Tab::Projects => '2',
            Tab::Templates => '3',
            Tab::Automation => '4',
            Tab::Analytics => '5',
        }
    }
}

/// TUI application state
pub struct App {
    /// Data store reference
    pub store: Arc<DataStore>,

    /// Event receiver for data updates
    pub event_rx: broadcast::Receiver<DataEvent>,

    /// Currently active tab
    pub active_tab: Tab,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Whether tab state needs to re-pull from the store
    pub needs_refresh: bool,

    /// True until the background load finishes
    pub is_loading: bool,

    /// Active color scheme, persisted across runs
    pub color_scheme: ColorScheme,

    pub spinner: Spinner,

    pub toasts: ToastManager,

    /// Where preferences are stored, None when no data dir exists
    prefs_dir: Option<PathBuf>,
}

impl App {
    pub fn new(store: Arc<DataStore>) -> Self {
        let event_rx = store.event_bus().subscribe();

        let prefs_dir = UiPreferences::default_dir();
        let color_scheme = prefs_dir
            .as_deref()
            .map(UiPreferences::load)
            .unwrap_or_default()
            .color_scheme;

        Self {
            store,
            event_rx,
            active_tab: Tab::Dashboard,
            should_quit: false,
            needs_refresh: true,
            is_loading: true,
            color_scheme,
            spinner: Spinner::new(),
            toasts: ToastManager::new(),
            prefs_dir,
        }
    }

    /// Mark the background load as finished and surface its outcome
    pub fn complete_loading(&mut self, summary: &LoadSummary) {
        self.is_loading = false;
        self.needs_refresh = true;

        if summary.has_warnings() {
            self.toasts.warning(format!(
                "Loaded with {} warning(s), see the log",
                summary.warnings.len()
            ));
        } else {
            self.toasts.success(format!(
                "Loaded {} projects, {} templates",
                summary.projects_seeded,
                summary.templates_loaded()
            ));
        }
    }

    /// Handle keyboard input.
    /// Returns true if the key was handled as a global key.
    pub fn handle_key(&mut self, key: crossterm::event::KeyCode) -> bool {
        use crossterm::event::KeyCode;

        match key {
            KeyCode::Char('q') => {
                self.should_quit = true;
                true
            }
            KeyCode::Char('r') => {
                self.needs_refresh = true;
                true
            }
            KeyCode::Char('t') => {
                self.toggle_color_scheme();
                true
            }
            KeyCode::Tab => {
                self.next_tab();
                true
            }
            KeyCode::BackTab => {
                self.prev_tab();
                true
            }
            KeyCode::Char(c) if ('1'..='5').contains(&c) => {
                let idx = (c as usize) - ('1' as usize);
                self.active_tab = Tab::from_index(idx);
                true
            }
            _ => false,
        }
    }

    fn next_tab(&mut self) {
        let idx = self.active_tab.index();
        self.active_tab = Tab::from_index((idx + 1) % Tab::all().len());
    }

    fn prev_tab(&mut self) {
        let idx = self.active_tab.index();
        self.active_tab = Tab::from_index((idx + Tab::all().len() - 1) % Tab::all().len());
    }

    fn toggle_color_scheme(&mut self) {
        self.color_scheme = self.color_scheme.toggled();

        let prefs = UiPreferences {
            color_scheme: self.color_scheme,
        };
        if let Some(dir) = self.prefs_dir.as_deref() {
            if let Err(e) = prefs.save(dir) {
                warn!(error = %e, "Could not persist color scheme");
                self.toasts.warning("Color scheme not saved");
                return;
            }
        }
        self.toasts.info(format!("Switched to {:?} mode", self.color_scheme));
    }

    /// Check for data events (non-blocking)
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                DataEvent::Loaded
                | DataEvent::ProjectChanged(_)
                | DataEvent::CommunicationLogged(_)
                | DataEvent::TemplatesChanged
                | DataEvent::ReportGenerated => {
                    self.needs_refresh = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    fn test_app() -> App {
        let store = Arc::new(DataStore::with_defaults());
        store.load();
        App::new(store)
    }

    #[test]
    fn test_tab_cycle_wraps() {
        let mut app = test_app();
        assert_eq!(app.active_tab, Tab::Dashboard);

        for _ in 0..Tab::all().len() {
            app.handle_key(KeyCode::Tab);
        }
        assert_eq!(app.active_tab, Tab::Dashboard);

        app.handle_key(KeyCode::BackTab);
        assert_eq!(app.active_tab, Tab::Analytics);
    }

    #[test]
    fn test_digit_shortcuts() {
        let mut app = test_app();
        assert!(app.handle_key(KeyCode::Char('4')));
        assert_eq!(app.active_tab, Tab::Automation);
        // Out-of-range digit is not a shortcut
        assert!(!app.handle_key(KeyCode::Char('9')));
        assert_eq!(app.active_tab, Tab::Automation);
    }

    #[test]
    fn test_quit_key() {
        let mut app = test_app();
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_unknown_key_falls_through() {
        let mut app = test_app();
        assert!(!app.handle_key(KeyCode::Char('x')));
    }

    #[test]
    fn test_tab_index_round_trip() {
        for tab in Tab::all() {
            assert_eq!(Tab::from_index(tab.index()), *tab);
        }
    }

    #[tokio::test]
    async fn test_poll_events_sets_refresh() {
        let mut app = test_app();
        app.needs_refresh = false;

        app.store.event_bus().publish(DataEvent::TemplatesChanged);
        app.poll_events();

        assert!(app.needs_refresh);
    }
}
