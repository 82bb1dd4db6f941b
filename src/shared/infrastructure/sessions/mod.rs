// In memory registry of per-visitor working state (editor drafts, answer sheets).
//
// Nothing in here is persisted; a restart drops every session. Idle sessions
// are dropped when a new one is opened, there is no background sweeper.

use crate::shared::core::primitives::{Timestamp, new_id, now};
use chrono::TimeDelta;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A session value. Each one has its own lock so a slow operation in one
/// session never holds up the registry or any other session.
pub type SessionHandle<T> = Arc<Mutex<T>>;

struct Session<T> {
    value: SessionHandle<T>,
    last_seen: Timestamp,
}

pub struct Sessions<T> {
    inner: Mutex<HashMap<String, Session<T>>>,
    idle_ttl: Option<TimeDelta>,
}

impl<T> Default for Sessions<T> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            idle_ttl: None,
        }
    }
}

impl<T> Sessions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_ttl(idle_ttl: TimeDelta) -> Self {
        Self {
            idle_ttl: Some(idle_ttl),
            ..Self::default()
        }
    }

    /// Store `value` under a fresh session id and return the id.
    pub async fn open(&self, value: T) -> String {
        if let Some(ttl) = self.idle_ttl {
            let evicted = self.evict_idle(now() - ttl).await;
            if evicted > 0 {
                tracing::debug!(evicted, "dropped idle sessions");
            }
        }
        let id = new_id();
        self.inner.lock().await.insert(
            id.clone(),
            Session {
                value: Arc::new(Mutex::new(value)),
                last_seen: now(),
            },
        );
        id
    }

    /// Hand out the session's handle and mark it as seen. The registry lock is
    /// released before this returns.
    pub async fn get(&self, id: &str) -> Option<SessionHandle<T>> {
        let mut guard = self.inner.lock().await;
        let session = guard.get_mut(id)?;
        session.last_seen = now();
        Some(session.value.clone())
    }

    pub async fn close(&self, id: &str) -> bool {
        self.inner.lock().await.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    /// Drop sessions not touched since `cutoff`. Returns how many were dropped.
    pub async fn evict_idle(&self, cutoff: Timestamp) -> usize {
        let mut guard = self.inner.lock().await;
        let before = guard.len();
        guard.retain(|_, session| session.last_seen >= cutoff);
        before - guard.len()
    }
}
