use chrono::{DateTime, Utc};
use serde::Serialize;
use tk_core::{Article, Citation, FetchResult, ALL_CATEGORY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Error,
}

/// Snapshot of everything the dashboard shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedState {
    pub phase: Phase,
    pub articles: Vec<Article>,
    pub grounding_metadata: Option<Vec<Citation>>,
    pub loading: bool,
    pub error: Option<String>,
    pub category: String,
    pub sidebar_open: bool,
    pub last_updated: Option<DateTime<Utc>>,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            articles: Vec::new(),
            grounding_metadata: None,
            // the first fetch starts immediately
            loading: true,
            error: None,
            category: ALL_CATEGORY.to_string(),
            sidebar_open: false,
            last_updated: None,
        }
    }
}

impl FeedState {
    /// Enter `Loading`. Articles stay in place until the fetch completes.
    pub fn begin_refresh(&mut self) {
        self.phase = Phase::Loading;
        self.loading = true;
        self.error = None;
    }

    /// Apply a fetch result. An error result keeps the previous articles.
    pub fn complete(&mut self, result: FetchResult, now: DateTime<Utc>) {
        if result.is_error() {
            self.fail(result.error.unwrap_or_default());
            return;
        }
        self.phase = Phase::Ready;
        self.loading = false;
        self.error = None;
        self.articles = result.articles;
        self.grounding_metadata = result.grounding_metadata;
        self.last_updated = Some(now);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.phase = Phase::Error;
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn is_all(&self) -> bool {
        self.category == ALL_CATEGORY
    }

    /// Articles visible under the active category filter.
    pub fn filtered_articles(&self) -> Vec<&Article> {
        if self.is_all() {
            return self.articles.iter().collect();
        }
        self.articles
            .iter()
            .filter(|a| a.matches_category(&self.category))
            .collect()
    }

    /// Breaking stories for the ticker, in feed order. Empty hides the ticker.
    pub fn breaking_news(&self) -> Vec<&Article> {
        self.articles.iter().filter(|a| a.is_breaking).collect()
    }
}
