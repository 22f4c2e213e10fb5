use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tk_core::{Article, Citation, FetchResult, NewsFetcher, Result};
use tracing::info;

/// Offline stand-in for the search model. Returns a fixed set of stories after `delay`.
pub struct MockFetcher {
    delay: Duration,
}

impl fmt::Debug for MockFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockFetcher").field("delay", &self.delay).finish()
    }
}

impl MockFetcher {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

// (headline, summary, category, source, breaking)
const STORIES: [(&str, &str, &str, &str, bool); 6] = [
    (
        "Nigeria's Economy Shows Strong Growth in Q4 2024",
        "Recent economic indicators suggest positive growth trends across multiple sectors despite global challenges.",
        "Business",
        "Business Daily",
        true,
    ),
    (
        "National Team Advances to Continental Finals",
        "The Super Eagles secure their spot in the championship after a thrilling semi-final match.",
        "Sports",
        "Sports Network",
        false,
    ),
    (
        "Tech Innovation Hub Launched in Lagos",
        "New technology center aims to foster innovation and startup growth in the region.",
        "Tech",
        "Tech Review",
        true,
    ),
    (
        "Entertainment Industry Sets New Records",
        "Nollywood and music industry achieve unprecedented international recognition this year.",
        "Entertainment",
        "Culture Times",
        false,
    ),
    (
        "Political Reforms Gain Momentum",
        "New legislative proposals aim to strengthen democratic institutions and processes.",
        "Politics",
        "National Herald",
        false,
    ),
    (
        "Healthcare Initiative Reaches Milestone",
        "National health program exceeds targets, improving access to medical services.",
        "Health",
        "Health Digest",
        false,
    ),
];

#[async_trait]
impl NewsFetcher for MockFetcher {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn fetch(&self) -> Result<FetchResult> {
        info!("Fetching news data...");
        tokio::time::sleep(self.delay).await;

        let now = Utc::now();
        let articles = STORIES
            .iter()
            .map(|(headline, summary, category, source, breaking)| {
                Article::new(*headline, *summary, now)
                    .with_category(*category)
                    .with_source(*source)
                    .breaking(*breaking)
            })
            .collect();
        let citations = vec![
            Citation::new("https://example.com/source1", Some("Official Economic Report".to_string())),
            Citation::new("https://example.com/source2", Some("Sports Association".to_string())),
        ];

        Ok(FetchResult::success(articles, Some(citations)))
    }
}
