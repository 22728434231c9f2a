//! Backend liveness checks

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::store::KvStore;

/// Result of a single probe; never cached
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Ok,
    Unavailable(String),
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, HealthStatus::Ok)
    }
}

/// Probes the store on demand
///
/// Holds no state besides the store handle, so every call reflects the
/// backend as it is right now.
#[derive(Clone)]
pub struct HealthMonitor {
    store: Arc<dyn KvStore>,
}

impl HealthMonitor {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub async fn probe(&self) -> HealthStatus {
        match self.store.ping().await {
            Ok(()) => {
                tracing::debug!("Health probe passed");
                HealthStatus::Ok
            }
            Err(e) => {
                tracing::debug!("Health probe failed: {}", e);
                HealthStatus::Unavailable(e.to_string())
            }
        }
    }
}

/// Spawn a task that probes on a fixed interval and logs transitions
///
/// Results are only logged. The `/health` endpoint always probes afresh.
pub fn spawn_health_watcher(monitor: HealthMonitor, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        let mut was_ok: Option<bool> = None;

        loop {
            ticker.tick().await;
            let status = monitor.probe().await;

            match (&status, was_ok) {
                (HealthStatus::Ok, Some(false)) => tracing::info!("Store connection recovered"),
                (HealthStatus::Ok, None) => tracing::info!("Store reachable"),
                (HealthStatus::Unavailable(reason), Some(true) | None) => {
                    tracing::warn!("Store unreachable: {}", reason)
                }
                _ => {}
            }

            was_ok = Some(status.is_ok());
        }
    })
}
