//! Result Cards
//!
//! Lays out the answer view: summary, finding cards and paper cards, as
//! pre-wrapped lines so the caller knows the exact content height.

use crate::render::{self, FindingCard, PaperCard};
use crate::tui::theme::{Icons, Theme};
use crate::types::SearchResponse;
use ratatui::{
    style::Style,
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const INDENT: &str = "  ";
/// Paper summaries are cut after this many lines
const SUMMARY_MAX_LINES: usize = 3;

/// Build every line of the results view for a content `width`
pub fn result_lines(
    query: &str,
    response: &SearchResponse,
    from_cache: bool,
    width: usize,
) -> Vec<Line<'static>> {
    let width = width.max(1);
    let body_width = width.saturating_sub(INDENT.len()).max(1);
    let mut lines = Vec::new();

    for chunk in wrap_text(query, width) {
        lines.push(Line::from(Span::styled(chunk, Theme::title())));
    }
    let subtitle = if from_cache {
        format!("{} {} cached", render::RESULTS_SUBTITLE, Icons::DOT)
    } else {
        render::RESULTS_SUBTITLE.to_string()
    };
    lines.push(Line::from(Span::styled(subtitle, Theme::text_secondary())));
    lines.push(Line::from(""));

    for chunk in wrap_text(response.web_summary.summary.trim(), width) {
        lines.push(Line::from(Span::styled(chunk, Theme::text())));
    }

    let findings = render::finding_cards(response);
    if !findings.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(render::FINDINGS_HEADING, Theme::heading())));
        for card in &findings {
            lines.push(Line::from(""));
            push_finding(&mut lines, card, body_width);
        }
    }

    let papers = render::paper_cards(response);
    if !papers.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(render::PAPERS_HEADING, Theme::heading())));
        for card in &papers {
            lines.push(Line::from(""));
            push_paper(&mut lines, card, body_width);
        }
    }

    lines
}

fn push_finding(lines: &mut Vec<Line<'static>>, card: &FindingCard, width: usize) {
    if let Some(title) = &card.title {
        push_wrapped(lines, title, width, Theme::heading());
    }
    if !card.badges.is_empty() {
        let styles = [Theme::badge(), Theme::badge_source()];
        lines.push(badge_line(&card.badges, |i| styles[i.min(1)]));
    }
    push_wrapped(lines, &card.text, width, Theme::text());

    let mut source = vec![Span::raw(INDENT)];
    if let Some(domain) = &card.domain {
        source.push(Span::styled(format!("Source: {} ", domain), Theme::text_secondary()));
    }
    source.push(Span::styled(format!("{} {}", Icons::LINK, card.url), Theme::link()));
    lines.push(Line::from(source));
}

fn push_paper(lines: &mut Vec<Line<'static>>, card: &PaperCard, width: usize) {
    push_wrapped(lines, &card.title, width, Theme::heading());
    if !card.badges.is_empty() {
        // the year badge, when present, is first
        let has_year = card
            .badges
            .first()
            .map(|b| b.chars().all(|c| c.is_ascii_digit()))
            .unwrap_or(false);
        lines.push(badge_line(&card.badges, |i| {
            if i == 0 && has_year {
                Theme::badge()
            } else {
                Theme::badge_category()
            }
        }));
    }
    if let Some(authors) = &card.authors {
        lines.push(Line::from(vec![
            Span::raw(INDENT),
            Span::styled("Authors: ", Theme::text()),
            Span::styled(authors.clone(), Theme::text_secondary()),
        ]));
    }
    if let Some(summary) = &card.summary {
        let mut wrapped = wrap_text(summary, width);
        if wrapped.len() > SUMMARY_MAX_LINES {
            wrapped.truncate(SUMMARY_MAX_LINES);
            if let Some(last) = wrapped.last_mut() {
                last.push_str("...");
            }
        }
        for chunk in wrapped {
            lines.push(Line::from(vec![
                Span::raw(INDENT),
                Span::styled(chunk, Theme::text_secondary()),
            ]));
        }
    }
    if let Some(confidence) = &card.confidence {
        lines.push(Line::from(vec![
            Span::raw(INDENT),
            Span::styled(confidence.clone(), Theme::text_dim()),
        ]));
    }
    lines.push(Line::from(vec![
        Span::raw(INDENT),
        Span::styled(format!("{} {}", Icons::LINK, card.url), Theme::link()),
    ]));
}

fn push_wrapped(lines: &mut Vec<Line<'static>>, text: &str, width: usize, style: Style) {
    for chunk in wrap_text(text, width) {
        lines.push(Line::from(vec![Span::raw(INDENT), Span::styled(chunk, style)]));
    }
}

fn badge_line(badges: &[String], style_for: impl Fn(usize) -> Style) -> Line<'static> {
    let mut spans = vec![Span::raw(INDENT)];
    for (i, badge) in badges.iter().enumerate() {
        spans.push(Span::styled(format!(" {} ", badge), style_for(i)));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Greedy word wrap by display width; over-long words are split
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_width = 0usize;

        for word in paragraph.split_whitespace() {
            let mut word = word.to_string();
            let mut word_width = UnicodeWidthStr::width(word.as_str());

            while word_width > width {
                if current_width > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                let (head, rest) = split_at_width(&word, width);
                lines.push(head);
                word = rest;
                word_width = UnicodeWidthStr::width(word.as_str());
            }

            let needed = if current_width == 0 {
                word_width
            } else {
                current_width + 1 + word_width
            };
            if needed > width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if current_width > 0 {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(&word);
            current_width += word_width;
        }

        if current_width > 0 || paragraph.trim().is_empty() {
            lines.push(current);
        }
    }

    lines
}

/// Longest prefix of `word` fitting in `width` columns, and the remainder.
/// Always takes at least one char so a glyph wider than `width` still advances.
fn split_at_width(word: &str, width: usize) -> (String, String) {
    let mut taken = 0usize;
    let mut split = word.len();

    for (idx, ch) in word.char_indices() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if taken + ch_width > width && idx > 0 {
            split = idx;
            break;
        }
        taken += ch_width;
    }

    let (head, rest) = word.split_at(split);
    (head.to_string(), rest.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Finding, ResearchPaper, WebSummary};

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(
            wrap_text("the quick brown fox jumps", 10),
            vec!["the quick", "brown fox", "jumps"]
        );
        assert_eq!(wrap_text("abcdefghijkl", 5), vec!["abcde", "fghij", "kl"]);
        assert_eq!(wrap_text("one\n\ntwo", 10), vec!["one", "", "two"]);
        assert!(wrap_text("", 10).is_empty());
    }

    #[test]
    fn test_wrap_text_measures_wide_glyphs() {
        let text = "牛は友達を作ることができる研究結果";
        let lines = wrap_text(text, 20);

        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!(UnicodeWidthStr::width(line.as_str()) <= 20, "{:?} too wide", line);
        }
        assert_eq!(lines.concat(), text);
    }

    #[test]
    fn test_wrap_text_wide_glyph_wider_than_width() {
        // a two-column glyph still makes progress in a one-column area
        assert_eq!(wrap_text("研究", 1), vec!["研", "究"]);
    }

    #[test]
    fn test_result_lines_fit_narrow_area() {
        let response = SearchResponse {
            is_valid: true,
            web_summary: WebSummary {
                summary: "Cows form close bonds with herd mates.".to_string(),
                ..Default::default()
            },
            papers: Vec::new(),
        };

        let lines = result_lines("Do cows have friends?", &response, false, 12);
        for line in lines.iter().filter(|l| !l.spans.is_empty()) {
            let text = line_text(line);
            // the subtitle is a fixed label, everything else is wrapped
            if text != render::RESULTS_SUBTITLE {
                assert!(line.width() <= 12, "{:?} too wide", text);
            }
        }
    }

    #[test]
    fn test_result_lines_sections() {
        let response = SearchResponse {
            is_valid: true,
            web_summary: WebSummary {
                summary: "Cows bond.".to_string(),
                findings: vec![Finding {
                    text: "Calves raised in pairs learn faster.".to_string(),
                    source_url: "https://www.ubc.ca/news".to_string(),
                    title: Some("Pair housing".to_string()),
                    domain: None,
                    source_name: Some("UBC".to_string()),
                    source_date: Some("2014".to_string()),
                }],
                error: None,
            },
            papers: vec![ResearchPaper {
                title: "Social learning in calves".to_string(),
                summary: "word ".repeat(200),
                url: "https://example.org/calves".to_string(),
                categories: vec!["Dairy".to_string()],
                authors: vec!["Costa".to_string()],
                year: Some(2014),
                confidence: Some(0.25),
                source: None,
            }],
        };

        let lines = result_lines("Can Cows Make Friends?", &response, true, 60);
        let text: Vec<String> = lines.iter().map(line_text).collect();

        assert_eq!(text[0], "Can Cows Make Friends?");
        assert!(text[1].contains("cached"));
        assert!(text.iter().any(|l| l == "Key Findings"));
        assert!(text.iter().any(|l| l.contains("Source: www.ubc.ca")));
        assert!(text.iter().any(|l| l.contains(" 2014 ") && l.contains(" UBC ")));
        assert!(text.iter().any(|l| l == "Relevant Research Papers"));
        assert!(text.iter().any(|l| l.contains("Authors: Costa")));
        assert!(text.iter().any(|l| l.contains("Confidence: 25.00%")));

        let summary_lines = text.iter().filter(|l| l.trim_start().starts_with("word")).count();
        assert_eq!(summary_lines, SUMMARY_MAX_LINES);
    }
}
