//! Persistent key-value collaborator and the pending deep-link slot.
//!
//! The navigation core uses storage for exactly one thing: the single
//! `pendingDeepLink` slot. Writes overwrite (last-write-wins); a missing slot
//! means nothing is queued.

use crate::error::StorageError;
use crate::lifecycle::lock;
use crate::notification::NotificationPayload;
use crate::{debug_log, warn_log};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Asynchronous string key-value storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory [`KeyValueStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> MutexGuard<'_, HashMap<String, String>> {
        lock(&self.values)
    }

    /// Read without going through the async interface.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.values().get(key).cloned()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values().get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.values().insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values().remove(key);
        Ok(())
    }
}

/// The single persistent slot holding a deferred deep link.
pub struct PendingDeepLinkSlot<'a> {
    store: &'a dyn KeyValueStore,
    key: &'a str,
}

impl<'a> PendingDeepLinkSlot<'a> {
    pub fn new(store: &'a dyn KeyValueStore, key: &'a str) -> Self {
        Self { store, key }
    }

    /// Queue a payload, replacing any queued one.
    pub async fn store(&self, payload: &NotificationPayload) -> Result<(), StorageError> {
        let value = serde_json::to_string(payload).map_err(|source| StorageError::Encode {
            key: self.key.to_string(),
            source,
        })?;
        self.store.set(self.key, value).await?;
        debug_log!("Queued deep link under '{}'", self.key);
        Ok(())
    }

    /// Read the queued payload. Absent slot is `Ok(None)`.
    pub async fn load(&self) -> Result<Option<NotificationPayload>, StorageError> {
        let Some(raw) = self.store.get(self.key).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                key: self.key.to_string(),
                source,
            })
    }

    /// Remove the slot. Failures are logged, never propagated.
    pub async fn clear(&self) {
        if let Err(err) = self.store.remove(self.key).await {
            warn_log!("Failed to clear '{}': {}", self.key, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_absent_slot_is_none() {
        let store = MemoryStore::new();
        let slot = PendingDeepLinkSlot::new(&store, "pendingDeepLink");
        assert!(slot.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = MemoryStore::new();
        let slot = PendingDeepLinkSlot::new(&store, "pendingDeepLink");

        let first = NotificationPayload::from_pairs([("screen", "budget"), ("id", "1")]);
        let second = NotificationPayload::from_pairs([("screen", "budget"), ("id", "2")]);
        slot.store(&first).await.unwrap();
        slot.store(&second).await.unwrap();

        assert_eq!(slot.load().await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn test_clear_removes_value() {
        let store = MemoryStore::new();
        let slot = PendingDeepLinkSlot::new(&store, "dl");
        slot.store(&NotificationPayload::from_pairs([("screen", "settings")]))
            .await
            .unwrap();
        assert!(store.peek("dl").is_some());

        slot.clear().await;
        assert!(store.peek("dl").is_none());
    }

    #[tokio::test]
    async fn test_corrupt_value() {
        let store = MemoryStore::new();
        store.set("dl", "not json".to_string()).await.unwrap();
        let slot = PendingDeepLinkSlot::new(&store, "dl");
        assert!(matches!(
            slot.load().await,
            Err(StorageError::Corrupt { .. })
        ));
    }
}
