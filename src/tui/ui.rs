//! UI Rendering
//!
//! Main UI layout and rendering logic for the TUI.

use crate::cache::KeyValueStore;
use crate::controller::ViewState;
use crate::render;
use crate::tui::app::{App, View, EXAMPLE_QUERIES};
use crate::tui::theme::{Icons, Theme};
use crate::tui::widgets;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

pub const LANDING_HEADING: &str = "What would you like to fact check?";
pub const LANDING_SUBTITLE: &str = "Get instant, research-backed answers to your questions using AI";
pub const TRY_ANOTHER_SEARCH: &str = "Try Another Search";

const LANDING_WIDTH: u16 = 72;

/// Render the main UI
pub fn render<S: KeyValueStore>(frame: &mut Frame, app: &App<S>) {
    let (header, body, status) = main_layout(frame.area());

    render_header(frame, header);
    match app.view {
        View::Landing => render_landing(frame, body, app),
        View::Results => render_results(frame, body, app),
    }
    render_status_bar(frame, status, app);

    if app.show_help {
        render_help(frame);
    }
}

/// The scrollable text area of the results view for a terminal of size `area`
pub fn results_body(area: Rect) -> Rect {
    let (_, body, _) = main_layout(area);
    results_block().inner(body)
}

fn main_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

fn results_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border_focused())
        .padding(Padding::horizontal(1))
}

fn render_header(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled("Fact Scout", Theme::title()),
        Span::styled("  research-backed answers", Theme::text_secondary()),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );

    frame.render_widget(title, area);
}

fn render_landing<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let width = area.width.min(LANDING_WIDTH);
    let column = Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(3), // Heading
            Constraint::Length(1),
            Constraint::Length(3), // Input
            Constraint::Length(1),
            Constraint::Length(6), // Examples
            Constraint::Fill(1),
        ])
        .split(column);

    let heading = Paragraph::new(vec![
        Line::from(Span::styled(LANDING_HEADING, Theme::title())),
        Line::from(""),
        Line::from(Span::styled(LANDING_SUBTITLE, Theme::text_secondary())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(heading, rows[1]);

    let input_focused = app.example_index.is_none() && !app.show_help;
    let input_block = Block::default()
        .title(" Ask ")
        .borders(Borders::ALL)
        .border_style(if input_focused {
            Theme::border_focused()
        } else {
            Theme::border()
        });
    let inner = input_block.inner(rows[3]);
    frame.render_widget(input_block, rows[3]);
    frame.render_widget(&app.input, inner);

    let examples: Vec<Line> = EXAMPLE_QUERIES
        .iter()
        .enumerate()
        .map(|(i, (icon, text))| {
            if app.example_index == Some(i) {
                Line::from(vec![
                    Span::styled(format!("{} ", Icons::SELECTED), Theme::selected()),
                    Span::raw(format!("{} ", icon)),
                    Span::styled(*text, Theme::selected()),
                ])
            } else {
                Line::from(vec![
                    Span::raw("  "),
                    Span::raw(format!("{} ", icon)),
                    Span::styled(*text, Theme::text()),
                ])
            }
        })
        .collect();

    let examples = Paragraph::new(examples).block(
        Block::default()
            .title(" Examples ")
            .borders(Borders::ALL)
            .border_style(if input_focused {
                Theme::border()
            } else {
                Theme::border_focused()
            }),
    );
    frame.render_widget(examples, rows[5]);
}

fn render_results<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    match app.state() {
        ViewState::Idle => {}
        ViewState::Loading { query } => {
            widgets::render_loading(frame, area, query.as_str(), app.loading_elapsed());
        }
        ViewState::Error { query, kind } => {
            let lines = vec![
                Line::from(Span::styled(query.to_string(), Theme::title())),
                Line::from(Span::styled(render::RESULTS_SUBTITLE, Theme::text_secondary())),
                Line::from(""),
                Line::from(vec![
                    Span::styled(format!("{} ", Icons::ERROR), Theme::error()),
                    Span::styled(kind.user_message().to_string(), Theme::error()),
                ]),
                Line::from(""),
                Line::from(vec![
                    Span::styled("[Esc] ", Theme::shortcut_key()),
                    Span::styled(TRY_ANOTHER_SEARCH, Theme::shortcut_desc()),
                ]),
            ];
            let paragraph = Paragraph::new(lines)
                .block(results_block())
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
        }
        ViewState::Success {
            query,
            response,
            from_cache,
        } => {
            let block = results_block();
            let inner = block.inner(area);
            frame.render_widget(block, area);

            let lines =
                widgets::result_lines(query.as_str(), response, *from_cache, inner.width as usize);
            let paragraph = Paragraph::new(lines).scroll((app.scroll_offset, 0));
            frame.render_widget(paragraph, inner);
        }
    }
}

fn render_status_bar<S: KeyValueStore>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let status = match (app.view, app.state()) {
        (View::Landing, _) | (_, ViewState::Idle) => Span::styled("Ready", Theme::text_secondary()),
        (_, ViewState::Loading { .. }) => Span::styled("Searching...", Theme::active()),
        (_, ViewState::Success { from_cache: true, .. }) => {
            Span::styled("Cached answer", Theme::complete())
        }
        (_, ViewState::Success { .. }) => Span::styled("Answer ready", Theme::complete()),
        (_, ViewState::Error { .. }) => Span::styled("Search failed", Theme::error()),
    };

    let shortcuts: &[(&str, &str)] = match app.view {
        View::Landing => &[
            ("[Enter]", " Search "),
            ("[Tab]", " Examples "),
            ("[F1]", " Help "),
            ("[Ctrl+Q]", " Quit"),
        ],
        View::Results => &[
            ("[Esc]", " New search "),
            ("[↑/↓]", " Scroll "),
            ("[F1]", " Help "),
            ("[Ctrl+Q]", " Quit"),
        ],
    };

    let mut spans = vec![Span::raw(" "), status, Span::raw(" │ ")];
    for (key, desc) in shortcuts {
        spans.push(Span::styled(*key, Theme::shortcut_key()));
        spans.push(Span::styled(*desc, Theme::shortcut_desc()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the help modal
fn render_help(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let shortcut = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("{:<13}", key), Theme::shortcut_key()),
            Span::styled(desc, Theme::text()),
        ])
    };

    let help_lines = vec![
        Line::from(Span::styled("Keyboard Shortcuts", Theme::heading())),
        Line::from(""),
        shortcut("Enter", "Search / Open selected example"),
        shortcut("Tab", "Next example question"),
        shortcut("Shift+Tab", "Previous example question"),
        shortcut("Esc", "Back to a new search"),
        shortcut("↑/↓", "Scroll results"),
        shortcut("PageUp/Down", "Scroll page"),
        shortcut("Ctrl+Q", "Quit application"),
        shortcut("Ctrl+C", "Force quit"),
        shortcut("F1", "Show this help"),
        Line::from(""),
        Line::from(Span::styled("Press any key to close", Theme::text_dim())),
    ];

    let paragraph = Paragraph::new(help_lines).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Theme::border_focused()),
    );

    frame.render_widget(paragraph, area);
}

/// Helper to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
