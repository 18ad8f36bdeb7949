use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::Result;
use crate::context::SessionRecord;
use crate::store::{SessionId, SessionStore};

/// In-memory session store for tests and single-process setups.
///
/// Behaves like the Redis implementation minus expiry: records live until
/// cleared or the process exits.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    records: Arc<RwLock<HashMap<SessionId, SessionRecord>>>,
}

impl InMemorySessionStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of records currently stored.
    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, id: &SessionId) -> Result<Option<SessionRecord>> {
        let records = self.records.read().await;
        Ok(records.get(id).cloned())
    }

    async fn save(&self, id: &SessionId, record: &SessionRecord) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(id.clone(), record.clone());
        Ok(())
    }

    async fn clear(&self, id: &SessionId) -> Result<()> {
        let mut records = self.records.write().await;
        records.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use cart::Cart;

    use super::*;

    fn record() -> SessionRecord {
        SessionRecord::new(None, Cart::new())
    }

    #[tokio::test]
    async fn save_and_load_roundtrip() {
        let store = InMemorySessionStore::new();
        let id = SessionId::generate();

        store.save(&id, &record()).await.unwrap();
        let loaded = store.load(&id).await.unwrap();

        assert!(loaded.is_some());
        assert_eq!(store.record_count().await, 1);
    }

    #[tokio::test]
    async fn load_missing_returns_none() {
        let store = InMemorySessionStore::new();

        let loaded = store.load(&SessionId::generate()).await.unwrap();

        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn save_overwrites_a_previous_record() {
        let store = InMemorySessionStore::new();
        let id = SessionId::generate();

        store.save(&id, &record()).await.unwrap();
        let replacement = record();
        store.save(&id, &replacement).await.unwrap();

        let loaded = store.load(&id).await.unwrap().unwrap();
        assert_eq!(loaded.saved_at, replacement.saved_at);
        assert_eq!(store.record_count().await, 1);
    }

    #[tokio::test]
    async fn clear_removes_the_record() {
        let store = InMemorySessionStore::new();
        let id = SessionId::generate();

        store.save(&id, &record()).await.unwrap();
        store.clear(&id).await.unwrap();

        assert!(store.load(&id).await.unwrap().is_none());
        assert_eq!(store.record_count().await, 0);
    }

    #[tokio::test]
    async fn clear_on_a_missing_record_is_fine() {
        let store = InMemorySessionStore::new();

        store.clear(&SessionId::generate()).await.unwrap();
    }
}
