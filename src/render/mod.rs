//! Presentation
//!
//! Stateless rendering of search results: card view models, the loading
//! message cycle, and a plain-text layout for non-interactive output.

pub mod cards;
pub mod loading;

pub use cards::{finding_cards, paper_cards, FindingCard, PaperCard};
pub use loading::message_for_elapsed;

use crate::controller::ViewState;
use std::fmt::{self, Write};

pub const RESULTS_SUBTITLE: &str = "Research-backed answer";
pub const FINDINGS_HEADING: &str = "Key Findings";
pub const PAPERS_HEADING: &str = "Relevant Research Papers";

/// Render a controller state as plain text
pub fn render_plain(state: &ViewState) -> String {
    let mut out = String::new();
    // writing into a String never fails
    write_state(&mut out, state).ok();
    out
}

fn write_state(out: &mut String, state: &ViewState) -> fmt::Result {
    match state {
        ViewState::Idle => Ok(()),
        ViewState::Loading { query } => {
            writeln!(out, "{}", query)?;
            writeln!(out, "{}", message_for_elapsed(0))
        }
        ViewState::Error { kind, .. } => writeln!(out, "{}", kind.user_message()),
        ViewState::Success {
            query,
            response,
            from_cache,
        } => {
            writeln!(out, "{}", query)?;
            writeln!(
                out,
                "{}{}\n",
                RESULTS_SUBTITLE,
                if *from_cache { " (cached)" } else { "" }
            )?;
            writeln!(out, "{}\n", response.web_summary.summary.trim())?;

            let findings = finding_cards(response);
            if !findings.is_empty() {
                writeln!(out, "{}", FINDINGS_HEADING)?;
                for (i, card) in findings.iter().enumerate() {
                    write_finding(out, i + 1, card)?;
                }
                writeln!(out)?;
            }

            let papers = paper_cards(response);
            if !papers.is_empty() {
                writeln!(out, "{}", PAPERS_HEADING)?;
                for (i, card) in papers.iter().enumerate() {
                    write_paper(out, i + 1, card)?;
                }
            }
            Ok(())
        }
    }
}

fn write_finding(out: &mut String, n: usize, card: &FindingCard) -> fmt::Result {
    match &card.title {
        Some(title) => {
            writeln!(out, "{:>3}. {}", n, title)?;
            writeln!(out, "     {}", card.text)?;
        }
        None => writeln!(out, "{:>3}. {}", n, card.text)?,
    }
    if !card.badges.is_empty() {
        writeln!(out, "     [{}]", card.badges.join("] ["))?;
    }
    match &card.domain {
        Some(domain) => writeln!(out, "     Source: {} <{}>", domain, card.url),
        None => writeln!(out, "     <{}>", card.url),
    }
}

fn write_paper(out: &mut String, n: usize, card: &PaperCard) -> fmt::Result {
    writeln!(out, "{:>3}. {}", n, card.title)?;
    if !card.badges.is_empty() {
        writeln!(out, "     [{}]", card.badges.join("] ["))?;
    }
    if let Some(authors) = &card.authors {
        writeln!(out, "     Authors: {}", authors)?;
    }
    if let Some(summary) = &card.summary {
        writeln!(out, "     {}", summary)?;
    }
    if let Some(confidence) = &card.confidence {
        writeln!(out, "     {}", confidence)?;
    }
    writeln!(out, "     <{}>", card.url)
}
