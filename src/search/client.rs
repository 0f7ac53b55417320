//! Search API Client
//!
//! Wraps the backend's single `POST /search` endpoint.
//!
//! ## Failure mapping
//!
//! - HTTP 429 becomes [`SearchError::RateLimited`] carrying the backend's
//!   `detail` message, so the UI can show it verbatim.
//! - Everything else that is not a decodable 2xx response becomes
//!   [`SearchError::RequestFailed`].
//!
//! The client never retries; callers decide what to do with a failure.

use crate::config::ApiConfig;
use crate::types::{AppError, AppResult, SearchQuery, SearchResponse};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Message used when a 429 body carries no usable `detail`
pub const DEFAULT_RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded";

/// Errors that can occur while calling the search backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("{0}")]
    RateLimited(String),

    #[error("Search request failed: {0}")]
    RequestFailed(String),
}

/// Anything that can answer a research question
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SearchError>;
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
}

#[derive(Deserialize)]
struct RateLimitBody {
    detail: Option<String>,
}

/// reqwest-backed client for the search API
pub struct SearchApiClient {
    client: Client,
    base_url: String,
}

impl SearchApiClient {
    /// Create a client with reqwest defaults (no request timeout)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Configure client from config
    pub fn from_config(config: &ApiConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/search", self.base_url)
    }
}

#[async_trait]
impl SearchBackend for SearchApiClient {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, SearchError> {
        let url = self.endpoint();
        info!(query = %query, "Sending search request");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&SearchRequest {
                query: query.as_str(),
            })
            .send()
            .await
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<RateLimitBody>(&body)
                .ok()
                .and_then(|b| b.detail)
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_RATE_LIMIT_MESSAGE.to_string());
            warn!(message = %message, "Search backend rate limited the request");
            return Err(SearchError::RateLimited(message));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Search backend returned an error");
            debug!(body = %body.chars().take(500).collect::<String>(), "Error body");
            return Err(SearchError::RequestFailed(format!("HTTP {}", status)));
        }

        let parsed = response
            .json::<SearchResponse>()
            .await
            .map_err(|e| SearchError::RequestFailed(format!("Invalid response body: {}", e)))?;

        info!(
            is_valid = parsed.is_valid,
            papers = parsed.papers.len(),
            findings = parsed.web_summary.findings.len(),
            "Search completed"
        );
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    fn query(text: &str) -> SearchQuery {
        SearchQuery::parse(text).unwrap()
    }

    #[tokio::test]
    async fn test_posts_query_and_decodes_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/search")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({ "query": "Can Plants Communicate?" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "is_valid": true,
                    "web_summary": {
                        "summary": "Plants signal through roots and volatiles.",
                        "findings": [
                            { "text": "Roots exchange chemical cues.", "source_url": "https://example.org/a" }
                        ]
                    },
                    "papers": [
                        { "title": "Plant talk", "summary": "A review.", "url": "https://example.org/p" }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = SearchApiClient::new(server.url());
        let response = assert_ok!(client.search(&query("Can Plants Communicate?")).await);

        assert!(response.is_valid);
        assert_eq!(response.papers.len(), 1);
        assert_eq!(response.web_summary.findings.len(), 1);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rate_limit_carries_detail() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/search")
            .with_status(429)
            .with_header("content-type", "application/json")
            .with_body(r#"{"detail": "Too many requests"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = SearchApiClient::new(server.url());
        let err = assert_err!(client.search(&query("anything")).await);

        assert_eq!(err, SearchError::RateLimited("Too many requests".to_string()));
        assert_eq!(err.to_string(), "Too many requests");
        // exactly one call: no retry on 429
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rate_limit_without_detail_uses_default() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/search")
            .with_status(429)
            .with_body("slow down")
            .create_async()
            .await;

        let client = SearchApiClient::new(server.url());
        let err = client.search(&query("anything")).await.unwrap_err();
        assert_eq!(err, SearchError::RateLimited(DEFAULT_RATE_LIMIT_MESSAGE.to_string()));
    }

    #[tokio::test]
    async fn test_server_error_is_request_failed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/search")
            .with_status(500)
            .with_body(r#"{"detail": "boom"}"#)
            .create_async()
            .await;

        let client = SearchApiClient::new(server.url());
        let err = client.search(&query("anything")).await.unwrap_err();
        assert!(matches!(err, SearchError::RequestFailed(_)));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_request_failed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/search")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = SearchApiClient::new(server.url());
        let err = client.search(&query("anything")).await.unwrap_err();
        assert!(matches!(err, SearchError::RequestFailed(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_request_failed() {
        // nothing listens on port 9 (discard) in the test environment
        let client = SearchApiClient::new("http://127.0.0.1:9");
        let err = client.search(&query("anything")).await.unwrap_err();
        assert!(matches!(err, SearchError::RequestFailed(_)));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = SearchApiClient::new("http://localhost:8000/");
        assert_eq!(client.endpoint(), "http://localhost:8000/search");

        let config = ApiConfig {
            url: "https://api.example.org//".to_string(),
            timeout_secs: 3,
        };
        let client = SearchApiClient::from_config(&config).unwrap();
        assert_eq!(client.endpoint(), "https://api.example.org/search");
    }
}
