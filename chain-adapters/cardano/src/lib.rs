//! Cardano chain adapter
//!
//! UTXO-model adapter: spendable outputs are identified by (tx hash, output
//! index) keys, the router contract address is the MPC custodian address
//! directly, and MPC trust is established by deriving the enterprise
//! address from the custodian's payment key.

pub mod address;
pub mod adapter;
pub mod client;
pub mod types;

// Re-export public types for convenience
pub use adapter::CardanoAdapter;
pub use client::{CardanoClient, CardanoConnector};
pub use types::{CardanoAsset, Tip, Utxo, UtxoKey, NATIVE_ASSET, NATIVE_DECIMALS};
