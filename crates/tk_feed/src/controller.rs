use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tk_core::NewsFetcher;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::state::{FeedState, Phase};

/// Message shown when the fetcher call itself fails.
pub const CONNECT_FAILED_MESSAGE: &str = "Failed to connect to service.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A fetch ran to completion, leaving the feed in the given phase.
    Completed(Phase),
    /// Another fetch was already in flight; nothing was dispatched.
    Coalesced,
}

/// User events forwarded by a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    SelectCategory(String),
    Refresh,
    Retry,
    ToggleMenu,
    CloseMenu,
}

/// Releases the in-flight flag when the fetch cycle ends, even on panic.
struct InFlight(Arc<Inner>);

impl InFlight {
    fn acquire(inner: &Arc<Inner>) -> Option<Self> {
        inner
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(inner.clone()))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.in_flight.store(false, Ordering::Release);
    }
}

struct Inner {
    fetcher: Arc<dyn NewsFetcher>,
    state: watch::Sender<FeedState>,
    in_flight: AtomicBool,
}

impl Inner {
    /// Fetch and apply the result. Entered only while holding [`InFlight`].
    async fn run_cycle(&self) -> Phase {
        info!("🔄 Refreshing feed from {}", self.fetcher.name());

        let result = self.fetcher.fetch().await;
        let now = Utc::now();

        let mut phase = Phase::Error;
        self.state.send_modify(|state| {
            match result {
                Ok(result) => {
                    if let Some(message) = &result.error {
                        warn!("Fetch reported an error: {}", message);
                    }
                    state.complete(result, now);
                }
                Err(e) => {
                    warn!("Fetch failed: {}", e);
                    state.fail(CONNECT_FAILED_MESSAGE);
                }
            }
            phase = state.phase;
        });

        if phase == Phase::Ready {
            let state = self.state.borrow();
            info!("✨ Feed updated with {} articles ({} breaking)", state.articles.len(), state.breaking_news().len());
        }
        phase
    }
}

/// Owns the feed state and runs fetch cycles against a [`NewsFetcher`].
///
/// Renderers observe the state through [`FeedController::subscribe`]; only the
/// controller writes to it.
pub struct FeedController {
    inner: Arc<Inner>,
}

impl FeedController {
    pub fn new(fetcher: Arc<dyn NewsFetcher>) -> Self {
        let (state, _) = watch::channel(FeedState::default());
        Self {
            inner: Arc::new(Inner {
                fetcher,
                state,
                in_flight: AtomicBool::new(false),
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.inner.state.subscribe()
    }

    pub fn snapshot(&self) -> FeedState {
        self.inner.state.borrow().clone()
    }

    #[cfg(test)]
    fn is_refreshing(&self) -> bool {
        self.inner.in_flight.load(Ordering::Acquire)
    }

    /// Run one fetch cycle unless one is already outstanding.
    ///
    /// The cycle runs on its own task: dropping the returned future stops the
    /// wait, not the fetch, and the state is still moved out of `Loading`.
    pub async fn refresh(&self) -> RefreshOutcome {
        let Some(guard) = InFlight::acquire(&self.inner) else {
            debug!("Refresh already in flight, skipping");
            return RefreshOutcome::Coalesced;
        };

        self.inner.state.send_modify(FeedState::begin_refresh);

        let cycle = tokio::spawn(async move {
            let phase = guard.0.run_cycle().await;
            drop(guard);
            phase
        });

        match cycle.await {
            Ok(phase) => RefreshOutcome::Completed(phase),
            Err(e) => {
                warn!("Refresh task failed: {}", e);
                self.inner.state.send_modify(|state| state.fail(CONNECT_FAILED_MESSAGE));
                RefreshOutcome::Completed(Phase::Error)
            }
        }
    }

    /// Change the active filter. Never triggers a fetch.
    pub fn select_category(&self, id: &str) {
        self.inner.state.send_modify(|state| {
            state.category = id.to_string();
            state.sidebar_open = false;
        });
        debug!("Category filter set to {}", id);
    }

    pub fn toggle_menu(&self) {
        self.inner.state.send_modify(|state| state.sidebar_open = !state.sidebar_open);
    }

    pub fn close_menu(&self) {
        self.inner.state.send_modify(|state| state.sidebar_open = false);
    }

    /// Dispatch a renderer event. Returns the refresh outcome for refresh-like events.
    pub async fn handle(&self, event: FeedEvent) -> Option<RefreshOutcome> {
        match event {
            FeedEvent::SelectCategory(id) => {
                self.select_category(&id);
                None
            }
            FeedEvent::Refresh | FeedEvent::Retry => Some(self.refresh().await),
            FeedEvent::ToggleMenu => {
                self.toggle_menu();
                None
            }
            FeedEvent::CloseMenu => {
                self.close_menu();
                None
            }
        }
    }
}
