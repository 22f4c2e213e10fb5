use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tk_core::{Article, Error, FetchResult, NewsFetcher, Result};

/// Fetcher that replays queued responses, counting calls. An empty queue yields an empty success.
pub struct ScriptedFetcher {
    responses: Mutex<VecDeque<Result<FetchResult>>>,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedFetcher {
    pub fn new(delay: Duration) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            delay,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn push(self, response: Result<FetchResult>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NewsFetcher for ScriptedFetcher {
    fn name(&self) -> &str {
        "Scripted"
    }

    async fn fetch(&self) -> Result<FetchResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(FetchResult::default()))
    }
}

pub fn articles(n: usize) -> Vec<Article> {
    (0..n)
        .map(|i| Article::new(format!("story {}", i), "summary", Utc::now()))
        .collect()
}

pub fn success(n: usize) -> Result<FetchResult> {
    Ok(FetchResult::success(articles(n), None))
}

pub fn broken() -> Result<FetchResult> {
    Err(Error::Fetch("connection reset".to_string()))
}
