use std::sync::Arc;

use tokio::sync::RwLock;

use crate::tracker::SessionTracker;

/// Shared handle to the single-writer tracker. Reads take the lock shared,
/// mutations take it exclusively, which serializes writers exactly as the
/// in-memory model requires.
#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<RwLock<SessionTracker>>,
}

impl AppState {
    pub fn new(tracker: SessionTracker) -> Self {
        Self {
            tracker: Arc::new(RwLock::new(tracker)),
        }
    }
}
