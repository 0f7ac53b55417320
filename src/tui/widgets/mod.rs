//! TUI Widgets
//!
//! Result cards and the loading indicator.

mod cards;
mod loading;

pub use cards::result_lines;
pub use loading::render_loading;
