//! Terminal User Interface Module
//!
//! Interactive front end for the fact checker. Built with Ratatui.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │               Fact Scout  research-backed answers               │
//! ├─────────────────────────────────────────────────────────────────┤
//! │           What would you like to fact check?                    │
//! │  ┌─ Ask ───────────────────────────────────────────────────┐   │
//! │  │ Ask anything...                                          │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │  ┌─ Examples ──────────────────────────────────────────────┐   │
//! │  │ ▶ 🌱 Can Plants Communicate?                             │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │ Ready │ [Enter] Search [Tab] Examples [F1] Help [Ctrl+Q] Quit   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Searches run on a spawned task and report back through an mpsc channel,
//! so the loading view keeps animating while the request is in flight.

pub mod app;
pub mod event;
pub mod theme;
pub mod ui;
pub mod widgets;

pub use app::{App, AppEvent, View};
pub use event::{AppAction, EventHandler};

use crate::cache::KeyValueStore;
use crate::controller::ResultsController;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::{error, info};

/// Type alias for our terminal backend
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

const TICK_RATE: Duration = Duration::from_millis(100);

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the TUI, optionally starting straight on the results for `initial_query`
pub async fn run<S: KeyValueStore>(
    controller: ResultsController<S>,
    initial_query: Option<String>,
) -> anyhow::Result<()> {
    info!("Starting TUI mode");

    let mut terminal = init_terminal()?;

    let mut app = App::new(controller);
    if let Some(query) = initial_query {
        app.submit_query(&query);
    }

    let mut events = EventHandler::new(TICK_RATE);

    let result = run_app(&mut terminal, &mut app, &mut events).await;

    if let Err(e) = restore_terminal(&mut terminal) {
        error!("Failed to restore terminal: {}", e);
    }

    result
}

/// Main application loop
async fn run_app<S: KeyValueStore>(
    terminal: &mut Tui,
    app: &mut App<S>,
    events: &mut EventHandler,
) -> anyhow::Result<()> {
    loop {
        let size = terminal.size()?;
        app.calculate_scroll_bounds(Rect::new(0, 0, size.width, size.height));

        terminal.draw(|frame| ui::render(frame, app))?;

        // Ticks arrive every TICK_RATE, so finished searches show up promptly
        let Some(action) = events.next().await else {
            break;
        };
        app.poll_events();
        app.handle_action(action);

        if app.should_quit {
            break;
        }
    }

    info!("TUI exited normally");
    Ok(())
}
