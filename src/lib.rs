// Fact Scout - research-backed answers to natural-language questions, in the terminal

pub mod cache;
pub mod config;
pub mod controller;
pub mod render;
pub mod search; // HTTP client for the research API
pub mod tui; // Terminal User Interface
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use controller::{FailureKind, ResultsController, ViewState};
