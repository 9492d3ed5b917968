//! Shared chain-adapter core for the cross-chain swap router
//!
//! Provides the building blocks every per-chain adapter composes:
//! connection management with background reconnect, the router/MPC trust
//! directory, concurrency-safe asset registries, swap nonce allocation and
//! the collaborator seams (key service, swap-history store).

pub mod adapter;
pub mod config;
pub mod connection;
pub mod directory;
pub mod error;
pub mod history;
pub mod keyservice;
pub mod nonce;
pub mod registry;

// Re-export public types for convenience
pub use adapter::ChainAdapter;
pub use config::{ConnectionSettings, GatewayConfig, RetryPolicy, TokenConfig};
pub use connection::{ConnectionManager, EndpointConnection, EndpointConnector};
pub use directory::{RouterInfoDirectory, SwapRouterInfo};
pub use error::{ConnectError, NonceError, RouterInfoError, TokenConfigError};
pub use history::{MemoryHistoryStore, SwapHistoryStore};
pub use keyservice::{MpcKeyService, StaticKeyService};
pub use nonce::NonceAllocator;
pub use registry::Registry;
