use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{Result, StateStore};

/// In-memory state store.
///
/// Cloning yields another handle to the same map, which lets tests inspect
/// what a component persisted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStateStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStateStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys.
    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.values.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_on_empty_store_is_none() {
        let store = InMemoryStateStore::new();
        assert_eq!(store.get("cart").await.unwrap(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_set_overwrites_previous_value() {
        let store = InMemoryStateStore::new();
        store.set("orderId", "1".to_string()).await.unwrap();
        store.set("orderId", "2".to_string()).await.unwrap();

        assert_eq!(store.get("orderId").await.unwrap().as_deref(), Some("2"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemoryStateStore::new();
        let other = store.clone();
        store.set("cart", "[]".to_string()).await.unwrap();

        assert_eq!(other.get("cart").await.unwrap().as_deref(), Some("[]"));

        other.remove("cart").await.unwrap();
        other.remove("cart").await.unwrap();
        assert_eq!(store.get("cart").await.unwrap(), None);
    }
}
