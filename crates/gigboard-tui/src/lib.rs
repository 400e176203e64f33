//! gigboard-tui - TUI frontend for gigboard using Ratatui

pub mod app;
pub mod components;
pub mod empty_state;
pub mod tabs;
pub mod theme;
pub mod ui;

pub use app::App;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gigboard_core::error::LoadSummary;
use gigboard_core::DataStore;
use ratatui::prelude::*;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

/// Run the TUI application
pub async fn run(store: Arc<DataStore>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // App starts in loading mode
    let mut app = App::new(store.clone());
    let mut ui = ui::Ui::new();

    // Channel to signal when loading completes
    let (load_tx, mut load_rx) = oneshot::channel();

    // Loading reads config and template files, keep it off the UI thread
    let store_clone = store.clone();
    tokio::task::spawn_blocking(move || {
        let summary = store_clone.load();
        let _ = load_tx.send(summary);
    });

    let result = run_loop(&mut terminal, &mut app, &mut ui, &mut load_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    ui: &mut ui::Ui,
    load_rx: &mut oneshot::Receiver<LoadSummary>,
) -> Result<()>
where
    <B as Backend>::Error: Send + Sync + 'static,
{
    loop {
        // Check if loading completed
        if let Ok(summary) = load_rx.try_recv() {
            app.complete_loading(&summary);
        }

        // Check for data events
        app.poll_events();

        terminal.draw(|f| ui.render(f, app))?;

        // Handle input with timeout for event polling
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    // Global keys first, then the active tab
                    let handled = app.handle_key(key.code);
                    if !handled && !app.is_loading {
                        ui.handle_tab_key(key.code, app);
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
