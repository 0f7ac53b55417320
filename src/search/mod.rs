//! Search Module
//!
//! Client side of the research search API: one HTTP call that turns a
//! question into a web summary plus related papers.

pub mod client;

pub use client::{SearchApiClient, SearchBackend, SearchError};
