//! Loading Widget
//!
//! Spinner plus the rotating status message shown while a search is in flight.

use crate::render::message_for_elapsed;
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::time::Duration;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_FRAME_MS: u128 = 100;

/// Render the loading indicator for `query`
pub fn render_loading(frame: &mut Frame, area: Rect, query: &str, elapsed: Duration) {
    let block = Block::default()
        .title(" Searching ")
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // vertically centre the four lines
    let top_padding = inner.height.saturating_sub(4) / 2;
    let mut lines: Vec<Line> = (0..top_padding).map(|_| Line::from("")).collect();

    lines.push(Line::from(Span::styled(query.to_string(), Theme::heading())));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(format!("{} ", spinner_frame(elapsed)), Theme::active()),
        Span::styled(message_for_elapsed(elapsed.as_secs()), Theme::text()),
    ]));
    lines.push(Line::from(Span::styled(
        format!("{}s elapsed", elapsed.as_secs()),
        Theme::text_dim(),
    )));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}

/// Spinner glyph for the elapsed time
fn spinner_frame(elapsed: Duration) -> &'static str {
    let index = (elapsed.as_millis() / SPINNER_FRAME_MS) as usize % SPINNER_FRAMES.len();
    SPINNER_FRAMES[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_advances_and_wraps() {
        assert_eq!(spinner_frame(Duration::from_millis(0)), SPINNER_FRAMES[0]);
        assert_eq!(spinner_frame(Duration::from_millis(250)), SPINNER_FRAMES[2]);
        assert_eq!(spinner_frame(Duration::from_millis(1_000)), SPINNER_FRAMES[0]);
    }
}
