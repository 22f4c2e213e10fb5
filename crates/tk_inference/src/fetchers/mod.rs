use std::sync::Arc;

use clap::ValueEnum;
use tk_core::{NewsFetcher, Result};
use tracing::info;

use crate::Config;

pub mod gemini;
pub mod mock;

pub use gemini::GeminiFetcher;
pub use mock::MockFetcher;

/// Message surfaced when the upstream service cannot be reached.
pub const UNAVAILABLE_MESSAGE: &str = "Unable to fetch news data. Please check your connection.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FetcherKind {
    /// Gemini with Google Search grounding
    Gemini,
    /// Static stories for offline development
    Mock,
}

pub fn create_fetcher(kind: FetcherKind, config: Config) -> Result<Arc<dyn NewsFetcher>> {
    let fetcher: Arc<dyn NewsFetcher> = match kind {
        FetcherKind::Gemini => Arc::new(GeminiFetcher::new(config)?),
        FetcherKind::Mock => Arc::new(MockFetcher::new(config.mock_delay)),
    };
    info!("🧠 News fetcher initialized (using {})", fetcher.name());
    Ok(fetcher)
}
