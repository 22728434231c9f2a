use crate::monitor::HealthMonitor;
use crate::store::KvStore;
use std::sync::Arc;

/// Shared application state
///
/// The store is injected at construction, so handlers never reach for a
/// global client and tests can swap in a fake.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KvStore>,
    pub health: HealthMonitor,
}

impl AppState {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            health: HealthMonitor::new(store.clone()),
            store,
        }
    }
}
