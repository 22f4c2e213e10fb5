use async_trait::async_trait;
use crate::types::FetchResult;
use crate::Result;

#[async_trait]
pub trait NewsFetcher: Send + Sync {
    /// Human readable name of the backend, used in logs
    fn name(&self) -> &str;

    /// Fetch the latest batch of articles.
    ///
    /// Upstream problems the fetcher can describe are reported through
    /// [`FetchResult::error`]; `Err` is reserved for calls that failed outright.
    async fn fetch(&self) -> Result<FetchResult>;
}
