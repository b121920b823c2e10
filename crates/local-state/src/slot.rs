//! Typed access to a single state key.

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{Result, StateStore};

/// Validation hook run on a freshly deserialized value.
pub type Validator<T> = fn(&T) -> std::result::Result<(), String>;

/// A typed view over one key of a [`StateStore`].
///
/// Loading never fails on bad content: a missing key, a value that does not
/// deserialize, or one rejected by the validator all come back as `None`.
/// Only store I/O failures surface as errors.
pub struct StateSlot<T> {
    key: &'static str,
    validator: Option<Validator<T>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> StateSlot<T> {
    /// Creates a slot for `key` with no extra validation.
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            validator: None,
            _marker: PhantomData,
        }
    }

    /// Creates a slot for `key` whose loaded values must pass `validator`.
    pub const fn with_validator(key: &'static str, validator: Validator<T>) -> Self {
        Self {
            key,
            validator: Some(validator),
            _marker: PhantomData,
        }
    }

    /// Returns the key this slot reads and writes.
    pub fn key(&self) -> &'static str {
        self.key
    }
}

impl<T: Serialize + DeserializeOwned> StateSlot<T> {
    /// Loads and validates the slot's value.
    pub async fn load<S: StateStore + ?Sized>(&self, store: &S) -> Result<Option<T>> {
        let Some(raw) = store.get(self.key).await? else {
            return Ok(None);
        };

        let value: T = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = self.key, error = %e, "discarding malformed state");
                return Ok(None);
            }
        };

        if let Some(validate) = self.validator
            && let Err(reason) = validate(&value)
        {
            tracing::warn!(key = self.key, %reason, "discarding invalid state");
            return Ok(None);
        }

        Ok(Some(value))
    }

    /// Serializes `value` and writes it under the slot's key.
    pub async fn save<S: StateStore + ?Sized>(&self, store: &S, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        store.set(self.key, raw).await
    }

    /// Removes the slot's value.
    pub async fn clear<S: StateStore + ?Sized>(&self, store: &S) -> Result<()> {
        store.remove(self.key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryStateStore;

    const COUNTER: StateSlot<u32> = StateSlot::new("counter");
    const EVEN: StateSlot<u32> = StateSlot::with_validator("even", must_be_even);

    fn must_be_even(n: &u32) -> std::result::Result<(), String> {
        if n % 2 == 0 {
            Ok(())
        } else {
            Err(format!("{n} is odd"))
        }
    }

    #[tokio::test]
    async fn test_absent_key_loads_as_none() {
        let store = InMemoryStateStore::new();
        assert_eq!(COUNTER.load(&store).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store = InMemoryStateStore::new();
        COUNTER.save(&store, &41).await.unwrap();
        assert_eq!(store.get("counter").await.unwrap().as_deref(), Some("41"));
        assert_eq!(COUNTER.load(&store).await.unwrap(), Some(41));
    }

    #[tokio::test]
    async fn test_malformed_value_loads_as_none() {
        let store = InMemoryStateStore::new();
        store.set("counter", "not json".to_string()).await.unwrap();
        assert_eq!(COUNTER.load(&store).await.unwrap(), None);

        store.set("counter", "-5".to_string()).await.unwrap();
        assert_eq!(COUNTER.load(&store).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_validator_rejection_loads_as_none() {
        let store = InMemoryStateStore::new();
        EVEN.save(&store, &3).await.unwrap();
        assert_eq!(EVEN.load(&store).await.unwrap(), None);

        EVEN.save(&store, &4).await.unwrap();
        assert_eq!(EVEN.load(&store).await.unwrap(), Some(4));
    }

    #[tokio::test]
    async fn test_clear_removes_value() {
        let store = InMemoryStateStore::new();
        COUNTER.save(&store, &1).await.unwrap();
        COUNTER.clear(&store).await.unwrap();
        assert_eq!(COUNTER.load(&store).await.unwrap(), None);
    }
}
