// Type definitions shared by the client, cache and UI

use serde::{Deserialize, Serialize};

/// A user's free-text research question.
///
/// Surrounding whitespace is trimmed; everything else (case, inner spacing)
/// is kept exactly as typed because it forms the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SearchQuery {
    query: String,
}

impl SearchQuery {
    /// Parse raw user input into a query, rejecting empty input
    pub fn parse(raw: &str) -> AppResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::InvalidRequest(
                "Query must not be empty".to_string(),
            ));
        }
        Ok(Self {
            query: trimmed.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.query
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.query)
    }
}

/// One cited claim extracted from a web source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub text: String,
    pub source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_date: Option<String>,
}

/// Narrative answer synthesized from web sources
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WebSummary {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub findings: Vec<Finding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A summarized academic source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchPaper {
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// Relevance score in `0.0..=1.0`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Body of a successful `POST /search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Whether the backend judged the query answerable
    pub is_valid: bool,
    #[serde(default)]
    pub web_summary: WebSummary,
    #[serde(default)]
    pub papers: Vec<ResearchPaper>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
