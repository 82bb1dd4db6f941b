// Key-value port backing quiz persistence.
//
// Values are whole serialized documents. A `set` either replaces the value
// completely or leaves the previous one in place.

pub mod file_system;
pub mod in_memory;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyValueError {
    #[error("storage quota exceeded: {needed} bytes needed, {available} available")]
    QuotaExceeded { needed: usize, available: usize },

    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), KeyValueError>;
}
