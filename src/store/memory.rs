//! In-process stand-in for the backing store, used by tests

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use super::{decode_stored, KvStore, StoreError};
use crate::hex::HexString;

pub struct MemoryStore {
    data: RwLock<HashMap<HexString, Vec<u8>>>,
    available: AtomicBool,
    failing: RwLock<HashSet<HexString>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
            failing: RwLock::new(HashSet::new()),
        }
    }

    /// Simulate the backend going away (`false`) or coming back (`true`)
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Make every write to `key` fail while other keys keep working
    pub fn fail_writes_for(&self, key: &HexString) {
        self.failing.write().unwrap().insert(key.clone());
    }

    /// Store arbitrary bytes, bypassing validation
    pub fn insert_raw(&self, key: &HexString, raw: impl Into<Vec<u8>>) {
        self.data.write().unwrap().insert(key.clone(), raw.into());
    }

    pub fn len(&self) -> usize {
        self.data.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn put(&self, key: &HexString, value: &HexString) -> Result<(), StoreError> {
        self.check_available()?;
        if self.failing.read().unwrap().contains(key) {
            return Err(StoreError::Unavailable(format!("write rejected for {}", key)));
        }
        self.data
            .write()
            .unwrap()
            .insert(key.clone(), value.as_str().as_bytes().to_vec());
        Ok(())
    }

    async fn get(&self, key: &HexString) -> Result<Option<HexString>, StoreError> {
        self.check_available()?;
        self.data
            .read()
            .unwrap()
            .get(key)
            .map(|raw| decode_stored(key, raw))
            .transpose()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Entries;

    fn hex(s: &str) -> HexString {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_round_trip_and_overwrite() {
        let store = MemoryStore::new();
        let key = hex("1234567890ABCDEF1234567890ABCDEF");
        let v1 = hex("11111111111111111111111111111111");
        let v2 = hex("22222222222222222222222222222222");

        store.put(&key, &v1).await.unwrap();
        store.put(&key, &v1).await.unwrap();
        assert_eq!(store.get(&key).await.unwrap(), Some(v1));

        store.put(&key, &v2).await.unwrap();
        assert_eq!(store.get(&key).await.unwrap(), Some(v2));
        assert_eq!(store.len(), 1);
        assert!(!store.is_empty());
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let store = MemoryStore::new();
        let key = hex("00000000000000000000000000000000");
        assert_eq!(store.get(&key).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unavailable_backend() {
        let store = MemoryStore::new();
        store.set_available(false);
        let key = hex("00000000000000000000000000000000");

        assert!(matches!(store.ping().await, Err(StoreError::Unavailable(_))));
        assert!(matches!(store.get(&key).await, Err(StoreError::Unavailable(_))));

        store.set_available(true);
        assert!(store.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_bulk_put_continues_past_failures() {
        let store = MemoryStore::new();
        let bad = hex("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");
        store.fail_writes_for(&bad);

        let mut entries = Entries::new();
        entries.insert(hex("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"), hex("00000000000000000000000000000001"));
        entries.insert(bad.clone(), hex("00000000000000000000000000000002"));
        entries.insert(hex("cccccccccccccccccccccccccccccccc"), hex("00000000000000000000000000000003"));

        assert_eq!(store.bulk_put(&entries).await.unwrap(), 2);
        assert_eq!(store.get(&bad).await.unwrap(), None);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_bulk_put_backend_down() {
        let store = MemoryStore::new();
        store.set_available(false);

        let mut entries = Entries::new();
        entries.insert(hex("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"), hex("00000000000000000000000000000001"));

        assert!(matches!(
            store.bulk_put(&entries).await,
            Err(StoreError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_corrupt_value() {
        let store = MemoryStore::new();
        let key = hex("dddddddddddddddddddddddddddddddd");
        store.insert_raw(&key, "not hex at all");

        assert!(matches!(
            store.get(&key).await,
            Err(StoreError::CorruptValue { .. })
        ));
    }

    #[tokio::test]
    async fn test_non_utf8_value_is_corrupt_not_unavailable() {
        let store = MemoryStore::new();
        let key = hex("eeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee");
        let mut raw = vec![0xc3_u8; 31];
        raw.push(0x28);
        store.insert_raw(&key, raw);

        assert!(matches!(
            store.get(&key).await,
            Err(StoreError::CorruptValue { .. })
        ));
        assert!(store.ping().await.is_ok());
    }
}
