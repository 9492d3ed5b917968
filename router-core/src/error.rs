//! Error Taxonomy Module
//!
//! Typed errors for the adapter core. Endpoint-level and per-token failures
//! are contained by their components and only logged; the variants here are
//! the ones callers must react to. `MpcKeyMismatch` is the single
//! trust-breaking, non-retryable failure: the router it concerns must be
//! refused until its configuration changes.

use thiserror::Error;

/// Initial-connect failure. The only fatal case is an empty connection set;
/// individual unreachable endpoints are logged and skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// Every configured endpoint address failed to connect
    #[error("no available remote api: all {attempted} configured addresses failed")]
    NoEndpoints { attempted: usize },
}

/// Token configuration rejection. The offending token is skipped; the
/// adapter continues with the remaining valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenConfigError {
    /// The chain's asset-address grammar rejected the string
    #[error("malformed asset address '{0}'")]
    MalformedAssetAddress(String),
    /// The currency component is not a valid currency code for the chain
    #[error("invalid currency '{0}'")]
    InvalidCurrency(String),
    /// Native currency configured with the wrong decimals
    #[error("invalid native decimals: want {want} but have {have}")]
    DecimalsMismatch { want: u8, have: u8 },
    /// Native currency must not carry an issuer
    #[error("native currency should not have issuer (got '{0}')")]
    UnexpectedIssuer(String),
    /// Non-native currency must carry an issuer
    #[error("non native currency must have issuer")]
    MissingIssuer,
    /// Issuer is present but not a valid chain address
    #[error("invalid issuer address '{0}'")]
    InvalidIssuerAddress(String),
}

/// Router-info initialization failure. Fatal for that router only; a
/// multi-router adapter may still serve its other routers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterInfoError {
    /// The router contract / MPC address is not well formed for the chain
    #[error("invalid router mpc address '{0}'")]
    InvalidRouterAddress(String),
    /// On-chain read of the router contract failed (retryable)
    #[error("resolve router mpc address failed for '{router_contract}': {reason}")]
    MpcResolutionFailed {
        router_contract: String,
        reason: String,
    },
    /// The trust anchor could not supply key material (retryable)
    #[error("get mpc public key failed for '{mpc}': {reason}")]
    PubkeyFetchFailed { mpc: String, reason: String },
    /// The fetched key does not derive to the resolved MPC address.
    /// Non-retryable: the router contract or the key service is
    /// compromised or misconfigured.
    #[error("mpc public key mismatch: key derives to '{derived}', expected '{expected}'")]
    MpcKeyMismatch { expected: String, derived: String },
    /// Nonce seeding failed after verification succeeded
    #[error(transparent)]
    NonceSeedFailed(#[from] NonceError),
}

/// Nonce allocator failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NonceError {
    /// The history store was reachable but kept erroring; proceeding from
    /// zero would risk nonce reuse on a chain with prior swap history.
    #[error("next swap nonce unavailable for chain {chain_id} owner '{owner}' after {attempts} attempts: {reason}")]
    SeedUnavailable {
        chain_id: u64,
        owner: String,
        attempts: u32,
        reason: String,
    },
}
