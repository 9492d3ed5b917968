//! Router Info Directory Module
//!
//! Process-wide directory of verified router bindings and MPC public keys,
//! written by the adapters after a successful `init_router_info` and read
//! by the swap dispatcher. A binding only becomes visible fully constructed;
//! re-verification overwrites the whole value rather than merging with a
//! stale one.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Verified binding of a router contract to its MPC custodian.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRouterInfo {
    /// MPC custodian address resolved from the router contract
    pub router_mpc: String,
    /// Wrapped-native asset address (contract-account chains only)
    pub router_wnative: Option<String>,
}

/// Directory of router bindings keyed by (chain id, router contract) and
/// MPC public keys keyed by MPC address.
pub struct RouterInfoDirectory {
    routers: RwLock<HashMap<(u64, String), SwapRouterInfo>>,
    mpc_public_keys: RwLock<HashMap<String, String>>,
}

impl RouterInfoDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self {
            routers: RwLock::new(HashMap::new()),
            mpc_public_keys: RwLock::new(HashMap::new()),
        }
    }

    /// Publishes the verified binding for a router contract, replacing any
    /// previous binding for the same (chain, contract) pair.
    pub async fn set_router_info(&self, chain_id: u64, router_contract: &str, info: SwapRouterInfo) {
        self.routers
            .write()
            .await
            .insert((chain_id, router_contract.to_string()), info);
    }

    /// Returns the verified binding for a router contract, if any.
    pub async fn router_info(&self, chain_id: u64, router_contract: &str) -> Option<SwapRouterInfo> {
        self.routers
            .read()
            .await
            .get(&(chain_id, router_contract.to_string()))
            .cloned()
    }

    /// Publishes the verified public key for an MPC custodian address.
    pub async fn set_mpc_public_key(&self, mpc_address: &str, public_key_hex: &str) {
        self.mpc_public_keys
            .write()
            .await
            .insert(mpc_address.to_string(), public_key_hex.to_string());
    }

    /// Returns the verified public key for an MPC custodian address, if any.
    pub async fn mpc_public_key(&self, mpc_address: &str) -> Option<String> {
        self.mpc_public_keys.read().await.get(mpc_address).cloned()
    }

    /// Number of published router bindings.
    pub async fn router_count(&self) -> usize {
        self.routers.read().await.len()
    }
}

impl Default for RouterInfoDirectory {
    fn default() -> Self {
        Self::new()
    }
}
