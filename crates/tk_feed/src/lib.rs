pub mod controller;
pub mod poller;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_utils;

pub use controller::{FeedController, FeedEvent, RefreshOutcome, CONNECT_FAILED_MESSAGE};
pub use poller::{spawn_poller, DEFAULT_REFRESH_INTERVAL};
pub use state::{FeedState, Phase};
pub use view::FeedView;
