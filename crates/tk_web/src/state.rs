use std::sync::Arc;
use tk_feed::FeedController;

pub struct AppState {
    pub controller: Arc<FeedController>,
}

impl AppState {
    pub fn new(controller: Arc<FeedController>) -> Self {
        Self { controller }
    }
}
