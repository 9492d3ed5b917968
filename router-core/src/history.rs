//! Swap History Store Module
//!
//! Seam to the persistent swap-history store. This core only queries it for
//! the next unused swap nonce during router-info initialization; an adapter
//! configured without a store skips nonce seeding entirely.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Persistent swap-history collaborator.
#[async_trait]
pub trait SwapHistoryStore: Send + Sync {
    /// Returns the next unused swap nonce for the (chain, owner) pair.
    /// A chain with no prior swap history legitimately answers zero.
    async fn find_next_swap_nonce(&self, chain_id: u64, owner: &str) -> anyhow::Result<u64>;
}

/// In-memory history store for tests and single-process deployments.
/// Unknown (chain, owner) pairs answer zero, like an empty history.
pub struct MemoryHistoryStore {
    nonces: RwLock<HashMap<(u64, String), u64>>,
}

impl MemoryHistoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            nonces: RwLock::new(HashMap::new()),
        }
    }

    /// Records the next swap nonce for a (chain, owner) pair.
    pub async fn set_next_swap_nonce(&self, chain_id: u64, owner: &str, nonce: u64) {
        self.nonces
            .write()
            .await
            .insert((chain_id, owner.to_string()), nonce);
    }
}

impl Default for MemoryHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SwapHistoryStore for MemoryHistoryStore {
    async fn find_next_swap_nonce(&self, chain_id: u64, owner: &str) -> anyhow::Result<u64> {
        Ok(self
            .nonces
            .read()
            .await
            .get(&(chain_id, owner.to_string()))
            .copied()
            .unwrap_or(0))
    }
}
