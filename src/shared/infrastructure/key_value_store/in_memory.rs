// In memory implementation of the KeyValueStore port.
//
// Purpose
// - Support repository and controller tests without touching the disk.
// - Emulate a capacity-limited medium (browser style quota) when configured.

use crate::shared::infrastructure::key_value_store::{KeyValueError, KeyValueStore};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
    quota_bytes: Option<usize>,
    is_offline: bool,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total bytes (keys plus values) the store will hold before refusing writes.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }
}

#[async_trait::async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueError> {
        if self.is_offline {
            return Err(KeyValueError::Backend("Key-value store offline".into()));
        }
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KeyValueError> {
        if self.is_offline {
            return Err(KeyValueError::Backend("Key-value store offline".into()));
        }

        let mut guard = self.entries.write().await;
        if let Some(quota) = self.quota_bytes {
            let others: usize = guard
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = key.len() + value.len();
            let available = quota.saturating_sub(others);
            if needed > available {
                return Err(KeyValueError::QuotaExceeded { needed, available });
            }
        }
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
