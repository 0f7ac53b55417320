//! Application State
//!
//! Contains the main application state and logic for the TUI.

use crate::cache::{FileStore, KeyValueStore};
use crate::controller::{Lookup, ResultsController, ViewState};
use crate::search::SearchError;
use crate::tui::event::AppAction;
use crate::tui::{ui, widgets};
use crate::types::{SearchQuery, SearchResponse};
use ratatui::layout::Rect;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, info};
use tui_textarea::TextArea;

pub const INPUT_PLACEHOLDER: &str = "Ask anything...";

/// Icon and text of the landing page suggestions
pub const EXAMPLE_QUERIES: [(&str, &str); 4] = [
    ("🌱", "Can Plants Communicate?"),
    ("🐄", "Can Cows Make Friends?"),
    ("🤖", "Can robots foster genuine human connections?"),
    ("🎮", "Do video games improve cognitive skills?"),
];

const DEFAULT_PAGE: u16 = 10;

/// Current view/screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Landing,
    Results,
}

/// Events from background search tasks
#[derive(Debug)]
pub enum AppEvent {
    SearchFinished {
        query: SearchQuery,
        outcome: Result<SearchResponse, SearchError>,
    },
}

/// Main application state
pub struct App<S: KeyValueStore = FileStore> {
    pub view: View,
    pub show_help: bool,
    pub should_quit: bool,

    // Landing
    pub input: TextArea<'static>,
    /// Highlighted example question, if any
    pub example_index: Option<usize>,

    // Results
    pub scroll_offset: u16,
    pub max_scroll: u16,
    page_height: u16,
    loading_since: Option<Instant>,

    controller: ResultsController<S>,

    event_rx: mpsc::Receiver<AppEvent>,
    event_tx: mpsc::Sender<AppEvent>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(controller: ResultsController<S>) -> Self {
        let (event_tx, event_rx) = mpsc::channel(16);

        Self {
            view: View::Landing,
            show_help: false,
            should_quit: false,
            input: new_input(),
            example_index: None,
            scroll_offset: 0,
            max_scroll: 0,
            page_height: DEFAULT_PAGE,
            loading_since: None,
            controller,
            event_rx,
            event_tx,
        }
    }

    pub fn state(&self) -> &ViewState {
        self.controller.state()
    }

    /// Time spent waiting on the current request
    pub fn loading_elapsed(&self) -> Duration {
        self.loading_since
            .map(|since| since.elapsed())
            .unwrap_or_default()
    }

    /// Open the results view for `raw`; blank input is ignored
    pub fn submit_query(&mut self, raw: &str) {
        let query = match SearchQuery::parse(raw) {
            Ok(query) => query,
            Err(_) => return,
        };

        self.view = View::Results;
        self.scroll_offset = 0;
        self.max_scroll = 0;
        self.loading_since = None;

        if self.controller.begin(query.clone()) == Lookup::Fetch {
            self.loading_since = Some(Instant::now());

            let backend = self.controller.backend();
            let tx = self.event_tx.clone();
            tokio::spawn(async move {
                let outcome = backend.search(&query).await;
                // the receiver only goes away on shutdown
                tx.send(AppEvent::SearchFinished { query, outcome }).await.ok();
            });
        }
    }

    /// Apply finished background searches
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SearchFinished { query, outcome } => {
                if self.controller.complete(&query, outcome) {
                    self.loading_since = None;
                } else {
                    debug!(query = %query, "Ignoring result for abandoned search");
                }
            }
        }
    }

    /// Handle a user action
    pub fn handle_action(&mut self, action: AppAction) {
        if self.show_help {
            match action {
                AppAction::Quit | AppAction::ForceQuit => self.should_quit = true,
                AppAction::Tick => {}
                _ => self.show_help = false,
            }
            return;
        }

        match action {
            AppAction::Quit | AppAction::ForceQuit => {
                self.should_quit = true;
            }
            AppAction::ToggleHelp => {
                self.show_help = true;
            }
            AppAction::Submit => {
                if self.view == View::Landing {
                    let raw = match self.example_index {
                        Some(index) => EXAMPLE_QUERIES[index].1.to_string(),
                        None => self.input.lines().join(" "),
                    };
                    self.submit_query(&raw);
                }
            }
            AppAction::Escape => match self.view {
                View::Results => self.back_to_landing(),
                View::Landing => self.example_index = None,
            },
            AppAction::ScrollUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
            }
            AppAction::ScrollDown => {
                if self.scroll_offset < self.max_scroll {
                    self.scroll_offset += 1;
                }
            }
            AppAction::ScrollPageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(self.page_height);
            }
            AppAction::ScrollPageDown => {
                self.scroll_offset = self
                    .scroll_offset
                    .saturating_add(self.page_height)
                    .min(self.max_scroll);
            }
            AppAction::NextField => {
                if self.view == View::Landing {
                    self.example_index = Some(match self.example_index {
                        Some(index) => (index + 1) % EXAMPLE_QUERIES.len(),
                        None => 0,
                    });
                }
            }
            AppAction::PrevField => {
                if self.view == View::Landing {
                    self.example_index = Some(match self.example_index {
                        Some(0) | None => EXAMPLE_QUERIES.len() - 1,
                        Some(index) => index - 1,
                    });
                }
            }
            AppAction::Input(key) => {
                if self.view == View::Landing {
                    self.example_index = None;
                    self.input.input(key);
                }
            }
            AppAction::Tick => {}
        }
    }

    /// Recompute scroll limits for a terminal of size `area`
    pub fn calculate_scroll_bounds(&mut self, area: Rect) {
        let viewport = ui::results_body(area);
        self.page_height = viewport.height.saturating_sub(1).max(1);

        let content_height = match self.controller.state() {
            ViewState::Success {
                query,
                response,
                from_cache,
            } if self.view == View::Results => {
                widgets::result_lines(query.as_str(), response, *from_cache, viewport.width as usize)
                    .len()
            }
            _ => 0,
        };

        let content_height = u16::try_from(content_height).unwrap_or(u16::MAX);
        self.max_scroll = content_height.saturating_sub(viewport.height);
        if self.scroll_offset > self.max_scroll {
            self.scroll_offset = self.max_scroll;
        }
    }

    fn back_to_landing(&mut self) {
        if self.controller.state().is_loading() {
            info!("Search abandoned");
        }
        self.controller.reset();
        self.view = View::Landing;
        self.loading_since = None;
        self.scroll_offset = 0;
        self.max_scroll = 0;
        self.example_index = None;
        self.input = new_input();
    }
}

fn new_input() -> TextArea<'static> {
    let mut input = TextArea::default();
    input.set_cursor_line_style(ratatui::style::Style::default());
    input.set_placeholder_text(INPUT_PLACEHOLDER);
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{MemoryStore, ResultCache};
    use crate::controller::FailureKind;
    use crate::search::SearchBackend;
    use crate::types::WebSummary;
    use async_trait::async_trait;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct EchoBackend {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SearchBackend for EchoBackend {
        async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(SearchResponse {
                is_valid: true,
                web_summary: WebSummary {
                    summary: format!("About {}", query),
                    ..Default::default()
                },
                papers: Vec::new(),
            })
        }
    }

    fn app() -> (App<MemoryStore>, Arc<EchoBackend>) {
        let backend = Arc::new(EchoBackend {
            calls: AtomicUsize::new(0),
        });
        let controller = ResultsController::new(backend.clone(), ResultCache::new(MemoryStore::new()));
        (App::new(controller), backend)
    }

    async fn wait_for_result(app: &mut App<MemoryStore>) {
        for _ in 0..100 {
            app.poll_events();
            if !app.state().is_loading() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("search never finished");
    }

    fn type_text(app: &mut App<MemoryStore>, text: &str) {
        for c in text.chars() {
            app.handle_action(AppAction::Input(KeyEvent::new(
                KeyCode::Char(c),
                KeyModifiers::NONE,
            )));
        }
    }

    #[tokio::test]
    async fn test_typed_query_is_searched() {
        let (mut app, backend) = app();
        type_text(&mut app, "  cows ");
        app.handle_action(AppAction::Submit);

        assert_eq!(app.view, View::Results);
        assert!(app.state().is_loading());

        wait_for_result(&mut app).await;
        match app.state() {
            ViewState::Success {
                query, from_cache, ..
            } => {
                assert_eq!(query.as_str(), "cows");
                assert!(!from_cache);
            }
            other => panic!("unexpected state {:?}", other),
        }
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
        assert_eq!(app.loading_elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_blank_submit_stays_on_landing() {
        let (mut app, backend) = app();
        type_text(&mut app, "   ");
        app.handle_action(AppAction::Submit);

        assert_eq!(app.view, View::Landing);
        assert_eq!(app.state(), &ViewState::Idle);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_example_selection_wraps() {
        let (mut app, _) = app();
        app.handle_action(AppAction::PrevField);
        assert_eq!(app.example_index, Some(3));
        app.handle_action(AppAction::NextField);
        assert_eq!(app.example_index, Some(0));

        app.handle_action(AppAction::NextField);
        app.handle_action(AppAction::Submit);
        assert_eq!(
            app.state().query().map(SearchQuery::as_str),
            Some("Can Cows Make Friends?")
        );
    }

    #[tokio::test]
    async fn test_repeat_search_served_from_cache() {
        let (mut app, backend) = app();
        app.submit_query("Can Plants Communicate?");
        wait_for_result(&mut app).await;

        app.handle_action(AppAction::Escape);
        assert_eq!(app.view, View::Landing);
        assert_eq!(app.state(), &ViewState::Idle);

        app.submit_query("Can Plants Communicate?");
        assert!(matches!(
            app.state(),
            ViewState::Success {
                from_cache: true,
                ..
            }
        ));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_abandoned_search_is_ignored() {
        let (mut app, _) = app();
        app.submit_query("first");
        app.handle_action(AppAction::Escape);

        // let the spawned request land
        tokio::time::sleep(Duration::from_millis(50)).await;
        app.poll_events();
        assert_eq!(app.state(), &ViewState::Idle);
        assert_eq!(app.view, View::Landing);
    }

    #[tokio::test]
    async fn test_help_overlay_swallows_next_key() {
        let (mut app, _) = app();
        app.handle_action(AppAction::ToggleHelp);
        assert!(app.show_help);

        app.handle_action(AppAction::Input(KeyEvent::new(
            KeyCode::Char('x'),
            KeyModifiers::NONE,
        )));
        assert!(!app.show_help);
        assert!(app.input.lines().join("").is_empty());
    }

    #[tokio::test]
    async fn test_scroll_is_clamped() {
        let (mut app, _) = app();
        app.max_scroll = 3;
        app.handle_action(AppAction::ScrollPageDown);
        assert_eq!(app.scroll_offset, 3);
        app.handle_action(AppAction::ScrollDown);
        assert_eq!(app.scroll_offset, 3);
        app.handle_action(AppAction::ScrollUp);
        assert_eq!(app.scroll_offset, 2);
        app.handle_action(AppAction::ScrollPageUp);
        assert_eq!(app.scroll_offset, 0);
    }

    #[test]
    fn test_failure_kind_reaches_state() {
        let backend = Arc::new(EchoBackend {
            calls: AtomicUsize::new(0),
        });
        let controller = ResultsController::new(backend, ResultCache::new(MemoryStore::new()));
        let mut app = App::new(controller);

        let query = SearchQuery::parse("q").unwrap();
        app.controller.begin(query.clone());
        app.view = View::Results;
        app.handle_event(AppEvent::SearchFinished {
            query,
            outcome: Err(SearchError::RateLimited("Slow down".to_string())),
        });

        assert!(matches!(
            app.state(),
            ViewState::Error {
                kind: FailureKind::RateLimited(_),
                ..
            }
        ));
    }
}
