//! Ripple chain adapter
//!
//! Ledger/currency-model adapter: assets are currency/issuer pairs, the
//! router contract address is the MPC custodian address directly, and MPC
//! trust is established by deriving the account address from the custodian's
//! public key.

pub mod address;
pub mod adapter;
pub mod asset;
pub mod client;

// Re-export public types for convenience
pub use adapter::RippleAdapter;
pub use asset::{RippleAsset, RippleCurrency, NATIVE_CURRENCY, NATIVE_DECIMALS};
pub use client::{AccountData, RippleConnector, RippleRemote, ServerInfo};
