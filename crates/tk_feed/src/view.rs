//! Render-ready projection of [`FeedState`], shared by every front end.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use tk_core::{Article, CategoryTone, CATEGORIES, DEFAULT_CATEGORY};

use crate::state::FeedState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryItem {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleCard {
    pub id: String,
    pub headline: String,
    pub summary: String,
    pub source: String,
    pub source_initial: Option<String>,
    pub category: String,
    pub tone: CategoryTone,
    pub is_breaking: bool,
}

impl From<&Article> for ArticleCard {
    fn from(article: &Article) -> Self {
        let category = if article.category.is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            article.category.clone()
        };
        Self {
            id: article.id.to_string(),
            headline: article.headline.clone(),
            summary: article.summary.clone(),
            source: article.source.clone(),
            source_initial: article.source_initial().map(String::from),
            tone: CategoryTone::for_category(&category),
            category,
            is_breaking: article.is_breaking,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitationLink {
    pub uri: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedView {
    pub heading: String,
    pub status: String,
    pub loading: bool,
    /// Placeholder cards while the first batch is loading.
    pub show_skeleton: bool,
    pub error: Option<String>,
    pub categories: Vec<CategoryItem>,
    pub sidebar_open: bool,
    pub articles: Vec<ArticleCard>,
    pub ticker: Vec<String>,
    pub citations: Vec<CitationLink>,
}

impl FeedView {
    pub fn from_state(state: &FeedState) -> Self {
        let heading = if state.is_all() {
            "Latest Headlines".to_string()
        } else {
            format!("{} News", state.category)
        };

        let categories = CATEGORIES
            .iter()
            .map(|c| CategoryItem {
                id: c.id,
                label: c.label,
                icon: c.icon,
                active: c.id == state.category,
            })
            .collect();

        let citations = state
            .grounding_metadata
            .iter()
            .flatten()
            .filter_map(|c| {
                c.display_label().map(|label| CitationLink {
                    uri: c.uri.clone(),
                    label,
                })
            })
            .collect();

        Self {
            heading,
            status: status_line(state.last_updated),
            loading: state.loading,
            show_skeleton: state.loading && state.articles.is_empty(),
            error: state.error.clone(),
            categories,
            sidebar_open: state.sidebar_open,
            articles: state.filtered_articles().into_iter().map(ArticleCard::from).collect(),
            ticker: state
                .breaking_news()
                .iter()
                .map(|a| format!("BREAKING: {}", a.headline))
                .collect(),
            citations,
        }
    }

    pub fn show_ticker(&self) -> bool {
        !self.ticker.is_empty()
    }
}

fn status_line(last_updated: Option<DateTime<Utc>>) -> String {
    match last_updated {
        Some(at) => format!("Last updated: {}", at.with_timezone(&Local).format("%H:%M:%S")),
        None => "Updating...".to_string(),
    }
}
