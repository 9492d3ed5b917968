//! Tron chain adapter
//!
//! Contract-account-model adapter: the router contract is a real on-chain
//! contract, so the MPC custodian and wrapped-native addresses are resolved
//! by read-only contract calls before the key-to-address cross-check.

pub mod address;
pub mod adapter;
pub mod client;

// Re-export public types for convenience
pub use adapter::{supports_chain_id, TronAdapter, MAINNET_CHAIN_ID, SHASTA_CHAIN_ID};
pub use client::{TronClient, TronConnector};
