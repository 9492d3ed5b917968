//! MPC Key Service Module
//!
//! Seam to the trust anchor that holds MPC public key material. Adapters
//! fetch the key for a resolved MPC address here and then cryptographically
//! cross-check it against the address before trusting the router.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Trust-anchor collaborator supplying MPC public key material.
#[async_trait]
pub trait MpcKeyService: Send + Sync {
    /// Fetches the hex-encoded public key for an MPC custodian address.
    async fn get_mpc_public_key(&self, mpc_address: &str) -> anyhow::Result<String>;
}

/// Map-backed key service for config-driven deployments and tests.
pub struct StaticKeyService {
    keys: RwLock<HashMap<String, String>>,
}

impl StaticKeyService {
    /// Creates an empty key service.
    pub fn new() -> Self {
        Self {
            keys: RwLock::new(HashMap::new()),
        }
    }

    /// Registers the public key for an MPC address.
    pub async fn set_key(&self, mpc_address: &str, public_key_hex: &str) {
        self.keys
            .write()
            .await
            .insert(mpc_address.to_string(), public_key_hex.to_string());
    }
}

impl Default for StaticKeyService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MpcKeyService for StaticKeyService {
    async fn get_mpc_public_key(&self, mpc_address: &str) -> anyhow::Result<String> {
        self.keys
            .read()
            .await
            .get(mpc_address)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no public key configured for mpc address '{}'", mpc_address))
    }
}
