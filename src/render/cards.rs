//! Card view models
//!
//! Flatten papers and findings into display-ready strings. Both the TUI
//! widgets and the plain-text output draw from these.

use crate::types::{Finding, ResearchPaper, SearchResponse};
use crate::utils::clean_text;
use reqwest::Url;

/// Findings shown on the results view
pub const MAX_FINDINGS: usize = 3;
pub const MAX_CATEGORIES: usize = 2;
pub const MAX_AUTHORS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct PaperCard {
    pub title: String,
    pub url: String,
    /// Year first, then categories
    pub badges: Vec<String>,
    pub authors: Option<String>,
    pub summary: Option<String>,
    pub confidence: Option<String>,
}

impl From<&ResearchPaper> for PaperCard {
    fn from(paper: &ResearchPaper) -> Self {
        let mut badges = Vec::new();
        if let Some(year) = paper.year {
            badges.push(year.to_string());
        }
        badges.extend(paper.categories.iter().take(MAX_CATEGORIES).cloned());

        let summary = clean_text(&paper.summary);

        Self {
            title: clean_text(&paper.title),
            url: paper.url.clone(),
            badges,
            authors: authors_line(&paper.authors),
            summary: (!summary.is_empty()).then_some(summary),
            confidence: paper.confidence.map(format_confidence),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FindingCard {
    pub title: Option<String>,
    pub text: String,
    pub url: String,
    /// Date, then source name
    pub badges: Vec<String>,
    pub domain: Option<String>,
}

impl From<&Finding> for FindingCard {
    fn from(finding: &Finding) -> Self {
        let badges = [&finding.source_date, &finding.source_name]
            .into_iter()
            .flatten()
            .cloned()
            .collect();

        Self {
            title: finding.title.clone(),
            text: finding.text.clone(),
            url: finding.source_url.clone(),
            badges,
            domain: source_domain(finding),
        }
    }
}

pub fn paper_cards(response: &SearchResponse) -> Vec<PaperCard> {
    response.papers.iter().map(PaperCard::from).collect()
}

pub fn finding_cards(response: &SearchResponse) -> Vec<FindingCard> {
    response
        .web_summary
        .findings
        .iter()
        .take(MAX_FINDINGS)
        .map(FindingCard::from)
        .collect()
}

/// "A, B, C et al." style author list
pub fn authors_line(authors: &[String]) -> Option<String> {
    if authors.is_empty() {
        return None;
    }
    let mut line = authors
        .iter()
        .take(MAX_AUTHORS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if authors.len() > MAX_AUTHORS {
        line.push_str(" et al.");
    }
    Some(line)
}

pub fn format_confidence(confidence: f64) -> String {
    format!("Confidence: {:.2}%", confidence * 100.0)
}

/// The finding's declared domain, else the host of its URL
pub fn source_domain(finding: &Finding) -> Option<String> {
    finding
        .domain
        .clone()
        .filter(|d| !d.is_empty())
        .or_else(|| {
            Url::parse(&finding.source_url)
                .ok()
                .and_then(|url| url.host_str().map(String::from))
        })
}
