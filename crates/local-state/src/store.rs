use async_trait::async_trait;

use crate::Result;

/// Core trait for client-local state stores.
///
/// Values are opaque strings. Typed access goes through
/// [`StateSlot`](crate::StateSlot), which owns (de)serialization.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
