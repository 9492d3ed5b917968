//! Chain Adapter Trait Module
//!
//! The uniform capability surface every per-chain adapter implements.
//! Variants exist for UTXO-model, ledger/currency-model and contract-account
//! chains; each composes the shared connection manager, registries, router
//! directory and nonce allocator rather than inheriting from a base.

use async_trait::async_trait;

use crate::config::{GatewayConfig, TokenConfig};
use crate::error::{ConnectError, RouterInfoError};

/// Capability surface of one chain adapter.
#[async_trait]
pub trait ChainAdapter: Send + Sync {
    /// Chain id this adapter serves.
    fn chain_id(&self) -> u64;

    /// Applies the gateway config: connects to the configured endpoints and
    /// arms the background reconnect loop (exactly once per adapter
    /// lifetime; re-application never stacks loops).
    async fn set_gateway_config(&self, gateway: &GatewayConfig) -> Result<(), ConnectError>;

    /// Validates and registers one token config. A validation failure is
    /// logged and the token skipped; it never aborts adapter startup.
    async fn set_token_config(&self, token: &TokenConfig);

    /// Verifies the router/MPC binding for a router contract and, when a
    /// history store is configured, seeds the swap nonce. Failure is fatal
    /// for that router only.
    async fn init_router_info(&self, router_contract: &str) -> Result<(), RouterInfoError>;

    /// Whether the string is a well-formed address on this chain.
    fn is_valid_address(&self, address: &str) -> bool;
}
