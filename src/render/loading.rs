//! Loading messages
//!
//! The loading view cycles through these while a search is in flight. The
//! choice is a pure function of elapsed time so the widget just asks for the
//! message on every frame.

pub const LOADING_MESSAGES: [&str; 4] = [
    "Indexing millions of research papers",
    "Finding the most relevant sources for you...",
    "Reading abstracts and extracting key findings...",
    "Synthesizing a research-backed answer...",
];

/// Seconds each message stays on screen
pub const MESSAGE_ROTATION_SECS: u64 = 10;

pub fn message_for_elapsed(seconds: u64) -> &'static str {
    let index = (seconds / MESSAGE_ROTATION_SECS) as usize % LOADING_MESSAGES.len();
    LOADING_MESSAGES[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_rotates_every_ten_seconds() {
        assert_eq!(message_for_elapsed(0), LOADING_MESSAGES[0]);
        assert_eq!(message_for_elapsed(9), LOADING_MESSAGES[0]);
        assert_eq!(message_for_elapsed(10), LOADING_MESSAGES[1]);
        assert_eq!(message_for_elapsed(25), LOADING_MESSAGES[2]);
        assert_eq!(message_for_elapsed(39), LOADING_MESSAGES[3]);
    }

    #[test]
    fn test_message_cycle_wraps() {
        assert_eq!(message_for_elapsed(40), LOADING_MESSAGES[0]);
        assert_eq!(message_for_elapsed(4 * 40 + 15), LOADING_MESSAGES[1]);
    }
}
