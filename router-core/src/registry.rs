//! Asset Registry Module
//!
//! Concurrency-safe string-keyed registries for validated asset, currency
//! and issuer entries. One registry instance lives per adapter (not as
//! process-wide ambient state) so lifecycle and tests stay isolated.
//! Writes are whole-value upserts; re-validating the same token overwrites
//! an entry with an equivalent value, and readers never observe a partially
//! written one.

use std::collections::HashMap;

use tokio::sync::RwLock;

/// A concurrency-safe key/value registry with idempotent upserts.
pub struct Registry<V: Clone> {
    entries: RwLock<HashMap<String, V>>,
}

impl<V: Clone> Registry<V> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts or overwrites the entry for `key`.
    pub async fn insert(&self, key: &str, value: V) {
        self.entries.write().await.insert(key.to_string(), value);
    }

    /// Returns a clone of the entry for `key`, if present.
    pub async fn get(&self, key: &str) -> Option<V> {
        self.entries.read().await.get(key).cloned()
    }

    /// Whether an entry exists for `key`.
    pub async fn contains(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }

    /// Number of registered entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the registry is empty.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl<V: Clone> Default for Registry<V> {
    fn default() -> Self {
        Self::new()
    }
}
