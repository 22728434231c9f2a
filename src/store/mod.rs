//! Contract with the backing key-value service
//!
//! Handlers only see [`KvStore`]. Production wires in [`RedisStore`]; tests
//! use the in-memory fake in [`memory`].

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::hex::{validate, HexString};

#[cfg(test)]
pub mod memory;
mod redis_store;

pub use redis_store::RedisStore;

/// Entries of a validated bulk write, keyed by canonical key
pub type Entries = BTreeMap<HexString, HexString>;

/// Failures reported by a store backend
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backend unreachable, erroring, or too slow to answer in time
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// The backend holds something under this key that is not a hex value
    #[error("stored value for key {key} is not a valid hex string")]
    CorruptValue { key: HexString },
}

#[async_trait]
pub trait KvStore: Send + Sync {
    /// Write `value` under `key`, replacing any previous value
    async fn put(&self, key: &HexString, value: &HexString) -> Result<(), StoreError>;

    /// Read the value under `key`; `Ok(None)` when the key is absent
    async fn get(&self, key: &HexString) -> Result<Option<HexString>, StoreError>;

    /// Write every entry independently and return how many succeeded
    ///
    /// A failed write does not stop the remaining ones and is not rolled
    /// back. When nothing could be written the last error is returned
    /// instead of a zero count.
    async fn bulk_put(&self, entries: &Entries) -> Result<usize, StoreError> {
        let mut stored = 0;
        let mut last_error = None;

        for (key, value) in entries {
            match self.put(key, value).await {
                Ok(()) => stored += 1,
                Err(e) => {
                    tracing::warn!("Bulk write failed for key {}: {}", key, e);
                    last_error = Some(e);
                }
            }
        }

        bulk_outcome(stored, last_error)
    }

    /// Minimal round-trip to check the backend is reachable
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Turn the raw bytes found under `key` back into a hex value
///
/// Anything that is not UTF-8 hex was written by some other client.
pub(crate) fn decode_stored(key: &HexString, raw: &[u8]) -> Result<HexString, StoreError> {
    std::str::from_utf8(raw)
        .ok()
        .and_then(|s| validate(s).ok())
        .ok_or_else(|| StoreError::CorruptValue { key: key.clone() })
}

pub(crate) fn bulk_outcome(stored: usize, last_error: Option<StoreError>) -> Result<usize, StoreError> {
    match last_error {
        Some(e) if stored == 0 => Err(e),
        _ => Ok(stored),
    }
}
