//! Configuration Types Module
//!
//! Shapes for the already-parsed configuration the adapters consume.
//! Gateway and token configuration is supplied by an external config loader;
//! this module only defines the structures plus the retry/reconnect knobs.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// Gateway configuration for one chain adapter.
///
/// Holds the primary and extended (fallback) endpoint addresses of the
/// chain's RPC service. Immutable after adapter initialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Primary endpoint addresses, in priority order
    pub api_address: Vec<String>,
    /// Extended/fallback endpoint addresses
    #[serde(default)]
    pub api_address_ext: Vec<String>,
}

impl GatewayConfig {
    /// Returns the combined primary+extended address sequence, deduplicated
    /// by address while preserving first-seen order.
    pub fn combined_addresses(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut addresses = Vec::new();
        for address in self.api_address.iter().chain(self.api_address_ext.iter()) {
            if seen.insert(address.clone()) {
                addresses.push(address.clone());
            }
        }
        addresses
    }
}

/// Token configuration for one (chain, token address) pair.
///
/// `contract_address` is the chain-native asset identifier string; each
/// adapter parses it with its own asset grammar. Immutable once accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Identifier of the logical asset in the router's canonical namespace
    pub token_id: String,
    /// Chain-native asset identifier string
    pub contract_address: String,
    /// Configured decimals for the asset
    pub decimals: u8,
}

/// Bounded-retry policy with an explicit backoff delay.
///
/// The attempt budget is fixed (3 attempts for connects and nonce seeding),
/// but the delay between attempts is configurable rather than an immediate
/// re-attempt against a possibly degraded endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum number of attempts before giving up
    pub max_attempts: u32,
    /// Base delay between attempts in milliseconds
    pub backoff_ms: u64,
    /// Double the delay after each failed attempt
    pub exponential: bool,
}

impl RetryPolicy {
    /// Delay to sleep after the given zero-based failed attempt.
    pub fn delay(&self, attempt: u32) -> Duration {
        if self.exponential {
            Duration::from_millis(self.backoff_ms.saturating_mul(1u64 << attempt.min(16)))
        } else {
            Duration::from_millis(self.backoff_ms)
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_ms: 500,
            exponential: false,
        }
    }
}

/// Connection-manager settings for one adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSettings {
    /// Retry policy applied per endpoint address during initial connect
    pub retry: RetryPolicy,
    /// Background reconnect cycle interval in milliseconds
    pub reconnect_interval_ms: u64,
    /// RPC client timeout in milliseconds (some chains need a longer one)
    pub rpc_timeout_ms: u64,
}

impl ConnectionSettings {
    /// RPC client timeout as a `Duration`.
    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_millis(self.rpc_timeout_ms)
    }
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            reconnect_interval_ms: 30_000,
            rpc_timeout_ms: 30_000,
        }
    }
}
