use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::categories::DEFAULT_CATEGORY;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: Uuid,
    pub headline: String,
    pub source: String,
    pub category: String,
    pub summary: String,
    pub is_breaking: bool,
    /// When the batch containing this article was fetched, not when the event happened.
    pub timestamp: DateTime<Utc>,
}

impl Article {
    pub fn new(headline: impl Into<String>, summary: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            headline: headline.into(),
            source: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            summary: summary.into(),
            is_breaking: false,
            timestamp,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn breaking(mut self, is_breaking: bool) -> Self {
        self.is_breaking = is_breaking;
        self
    }

    /// Case-insensitive substring match used by the category filter.
    pub fn matches_category(&self, filter: &str) -> bool {
        self.category.to_lowercase().contains(&filter.to_lowercase())
    }

    /// First character of the source, used as the card avatar.
    pub fn source_initial(&self) -> Option<char> {
        self.source.chars().next()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Citation {
    pub fn new(uri: impl Into<String>, title: Option<String>) -> Self {
        Self { uri: uri.into(), title }
    }

    pub fn has_uri(&self) -> bool {
        !self.uri.trim().is_empty()
    }

    /// Link text for a citation: the title when present, otherwise the host of the uri.
    /// Returns `None` when the citation cannot be rendered as a link.
    pub fn display_label(&self) -> Option<String> {
        if !self.has_uri() {
            return None;
        }
        if let Some(title) = self.title.as_deref().filter(|t| !t.trim().is_empty()) {
            return Some(title.to_string());
        }
        Url::parse(&self.uri)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
    }
}

/// Output of a fetch collaborator. When `error` is set the articles are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResult {
    pub articles: Vec<Article>,
    pub grounding_metadata: Option<Vec<Citation>>,
    pub error: Option<String>,
}

impl FetchResult {
    pub fn success(articles: Vec<Article>, grounding_metadata: Option<Vec<Citation>>) -> Self {
        Self {
            articles,
            grounding_metadata,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            articles: Vec::new(),
            grounding_metadata: None,
            error: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
