use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::controller::{FeedController, RefreshOutcome};

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Refresh immediately, then every `every` for as long as the task lives.
///
/// Ticks that land while a manual refresh is running are coalesced by the controller.
pub fn spawn_poller(controller: Arc<FeedController>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!("⏱️ Polling for news every {}s", every.as_secs());

        loop {
            ticker.tick().await;
            match controller.refresh().await {
                RefreshOutcome::Completed(phase) => debug!("Scheduled refresh finished: {:?}", phase),
                RefreshOutcome::Coalesced => debug!("Scheduled refresh skipped, one already running"),
            }
        }
    })
}
