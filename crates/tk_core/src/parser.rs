//! Parser for the delimited plain-text format the search model is asked to answer in.
//!
//! ```text
//! HEADLINE: ...
//! SOURCE: ...
//! CATEGORY: ...
//! SUMMARY: ...
//! IS_BREAKING: true
//! ---
//! ```
//!
//! Parsing is best effort: unknown lines are ignored and chunks missing a headline or a
//! summary are dropped without raising an error.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::categories::DEFAULT_CATEGORY;
use crate::types::Article;

pub const DELIMITER: &str = "---";

#[derive(Default)]
struct Draft {
    headline: String,
    source: String,
    category: String,
    summary: String,
    is_breaking: bool,
}

type Setter = fn(&mut Draft, &str);

// First matching prefix wins; later lines for the same key overwrite earlier ones.
const FIELDS: [(&str, Setter); 5] = [
    ("HEADLINE:", |d, v| d.headline = v.to_string()),
    ("SOURCE:", |d, v| d.source = v.to_string()),
    ("CATEGORY:", |d, v| d.category = v.to_string()),
    ("SUMMARY:", |d, v| d.summary = v.to_string()),
    ("IS_BREAKING:", |d, v| d.is_breaking = v.to_lowercase() == "true"),
];

impl Draft {
    fn apply(&mut self, line: &str) {
        let line = line.trim();
        if let Some((prefix, set)) = FIELDS.iter().find(|(prefix, _)| line.starts_with(prefix)) {
            set(self, line[prefix.len()..].trim());
        }
    }

    fn finish(self, timestamp: DateTime<Utc>) -> Option<Article> {
        if self.headline.is_empty() || self.summary.is_empty() {
            return None;
        }
        let category = if self.category.is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            self.category
        };
        Some(
            Article::new(self.headline, self.summary, timestamp)
                .with_source(self.source)
                .with_category(category)
                .breaking(self.is_breaking),
        )
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ParseReport {
    pub articles: Vec<Article>,
    /// Non-blank chunks discarded for lacking a headline or a summary.
    pub dropped: usize,
}

/// Parse a model response into articles, in the order they appear.
pub fn parse(text: &str) -> Vec<Article> {
    parse_report(text).articles
}

pub fn parse_report(text: &str) -> ParseReport {
    parse_at(text, Utc::now())
}

/// Like [`parse_report`], stamping every article with `timestamp`.
pub fn parse_at(text: &str, timestamp: DateTime<Utc>) -> ParseReport {
    let mut report = ParseReport::default();

    for (index, chunk) in split_chunks(text).into_iter().enumerate() {
        let mut draft = Draft::default();
        for line in &chunk {
            draft.apply(line);
        }
        match draft.finish(timestamp) {
            Some(article) => report.articles.push(article),
            None => {
                debug!("Dropping chunk {} without headline or summary", index);
                report.dropped += 1;
            }
        }
    }

    report
}

/// Split on delimiter lines, skipping chunks with no visible content.
fn split_chunks(text: &str) -> Vec<Vec<&str>> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim() == DELIMITER {
            chunks.push(std::mem::take(&mut current));
        } else {
            current.push(line);
        }
    }
    chunks.push(current);

    chunks
        .into_iter()
        .filter(|chunk| chunk.iter().any(|line| !line.trim().is_empty()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(headline: &str) -> String {
        format!("HEADLINE: {}\nSUMMARY: summary of {}\n---\n", headline, headline)
    }

    #[test]
    fn test_parse_well_formed_chunk() {
        let text = "HEADLINE: A\nSOURCE: B\nCATEGORY: Tech\nSUMMARY: C\nIS_BREAKING: true\n---\n";
        let articles = parse(text);
        assert_eq!(articles.len(), 1);
        let article = &articles[0];
        assert_eq!(article.headline, "A");
        assert_eq!(article.source, "B");
        assert_eq!(article.category, "Tech");
        assert_eq!(article.summary, "C");
        assert!(article.is_breaking);
    }

    #[test]
    fn test_missing_required_field_drops_record() {
        let report = parse_report("SOURCE: B\n---\n");
        assert!(report.articles.is_empty());
        assert_eq!(report.dropped, 1);

        assert!(parse("HEADLINE: only a headline\n---\n").is_empty());
        assert!(parse("SUMMARY: only a summary\n---\n").is_empty());
        assert!(parse("HEADLINE:   \nSUMMARY: blank headline\n---\n").is_empty());
    }

    #[test]
    fn test_default_category() {
        let articles = parse("HEADLINE: A\nSUMMARY: C\n---\n");
        assert_eq!(articles[0].category, "General");

        let articles = parse("HEADLINE: A\nCATEGORY:\nSUMMARY: C\n---\n");
        assert_eq!(articles[0].category, "General");
    }

    #[test]
    fn test_unknown_category_is_kept_verbatim() {
        let articles = parse("HEADLINE: A\nCATEGORY: Health & Science\nSUMMARY: C\n");
        assert_eq!(articles[0].category, "Health & Science");
    }

    #[test]
    fn test_breaking_flag() {
        let flag = |value: &str| {
            parse(&format!("HEADLINE: A\nSUMMARY: C\nIS_BREAKING: {}\n---\n", value))[0].is_breaking
        };
        assert!(flag("true"));
        assert!(flag("TRUE"));
        assert!(flag("  True  "));
        assert!(!flag("false"));
        assert!(!flag("yes"));
        assert!(!flag(""));
        assert!(!parse("HEADLINE: A\nSUMMARY: C\n")[0].is_breaking);
    }

    #[test]
    fn test_order_preserved() {
        for n in 0..6 {
            let text: String = (0..n).map(|i| chunk(&format!("story {}", i))).collect();
            let headlines: Vec<String> = parse(&text).into_iter().map(|a| a.headline).collect();
            let expected: Vec<String> = (0..n).map(|i| format!("story {}", i)).collect();
            assert_eq!(headlines, expected);
        }
    }

    #[test]
    fn test_last_occurrence_wins() {
        let articles = parse("HEADLINE: first\nHEADLINE: second\nSUMMARY: C\n---");
        assert_eq!(articles[0].headline, "second");
    }

    #[test]
    fn test_whitespace_only_chunk_yields_nothing() {
        let report = parse_report("   \n\t\n---\n  \n---\n");
        assert!(report.articles.is_empty());
        assert_eq!(report.dropped, 0);
    }

    #[test]
    fn test_trailing_delimiter_without_newline() {
        let articles = parse("HEADLINE: A\nSUMMARY: C\n---");
        assert_eq!(articles.len(), 1);
        let articles = parse("HEADLINE: A\nSUMMARY: C\n  ---  \nHEADLINE: B\nSUMMARY: D");
        assert_eq!(articles.len(), 2);
    }

    #[test]
    fn test_keys_match_only_at_line_start() {
        let text = "Note HEADLINE: not a key\n   HEADLINE: Indented\nSUMMARY: x SUMMARY: y\n";
        let articles = parse(text);
        assert_eq!(articles[0].headline, "Indented");
        assert_eq!(articles[0].summary, "x SUMMARY: y");
    }

    #[test]
    fn test_surrounding_prose_is_ignored() {
        let text = "Here are the top stories:\n\nHEADLINE: A\n**SOURCE: not parsed**\nSUMMARY: C\n---\nThanks!";
        let report = parse_report(text);
        assert_eq!(report.articles.len(), 1);
        assert_eq!(report.articles[0].source, "");
        assert_eq!(report.dropped, 1);
    }

    #[test]
    fn test_articles_share_timestamp_and_have_unique_ids() {
        let now = Utc::now();
        let report = parse_at(&format!("{}{}", chunk("a"), chunk("b")), now);
        assert!(report.articles.iter().all(|a| a.timestamp == now));
        assert_ne!(report.articles[0].id, report.articles[1].id);
    }
}
