use std::time::Duration;

pub mod fetchers;

pub use fetchers::{create_fetcher, FetcherKind};
pub use tk_core::NewsFetcher;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model_name: String,
    pub base_url: String,
    /// Region the stories should come from, interpolated into the prompt.
    pub region: String,
    pub story_count: usize,
    pub request_timeout: Duration,
    /// Artificial latency of the mock backend.
    pub mock_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model_name: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            region: "Nigeria".to_string(),
            story_count: 8,
            request_timeout: Duration::from_secs(60),
            mock_delay: Duration::from_secs(1),
        }
    }
}
