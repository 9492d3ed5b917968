//! Ripple Adapter Module
//!
//! Composition root for the ledger/currency-model chain: connection
//! management, token config validation into the currency/issuer/asset
//! registries, and router-info verification. On ripple the router contract
//! address is the MPC custodian address itself, so resolution is identity
//! and trust rests entirely on the key-to-address cross-check.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use router_core::{
    ChainAdapter, ConnectError, ConnectionManager, ConnectionSettings, GatewayConfig,
    MpcKeyService, NonceAllocator, Registry, RouterInfoDirectory, RouterInfoError,
    SwapHistoryStore, SwapRouterInfo, TokenConfig, TokenConfigError,
};

use crate::address;
use crate::asset::{RippleAsset, RippleCurrency, NATIVE_DECIMALS};
use crate::client::RippleConnector;

/// Chain adapter for a ripple-style ledger chain.
pub struct RippleAdapter {
    chain_id: u64,
    connections: Arc<ConnectionManager<RippleConnector>>,
    currencies: Registry<RippleCurrency>,
    issuers: Registry<[u8; 20]>,
    assets: Registry<RippleAsset>,
    directory: Arc<RouterInfoDirectory>,
    key_service: Arc<dyn MpcKeyService>,
    history: Option<Arc<dyn SwapHistoryStore>>,
    nonces: NonceAllocator,
}

impl RippleAdapter {
    /// Creates an adapter wired to its collaborators. The history store is
    /// optional; without one, nonce seeding is skipped.
    pub fn new(
        chain_id: u64,
        settings: ConnectionSettings,
        directory: Arc<RouterInfoDirectory>,
        key_service: Arc<dyn MpcKeyService>,
        history: Option<Arc<dyn SwapHistoryStore>>,
    ) -> Self {
        let connector = RippleConnector::new(settings.rpc_timeout());
        let nonces = NonceAllocator::new(settings.retry.clone());
        Self {
            chain_id,
            connections: Arc::new(ConnectionManager::new(connector, settings)),
            currencies: Registry::new(),
            issuers: Registry::new(),
            assets: Registry::new(),
            directory,
            key_service,
            history,
            nonces,
        }
    }

    /// The adapter's connection manager, for RPC callers picking endpoints.
    pub fn connections(&self) -> &Arc<ConnectionManager<RippleConnector>> {
        &self.connections
    }

    /// Validates one token config and populates the registries.
    ///
    /// Steps: parse the asset grammar, validate the currency code, apply
    /// native/issued invariants, then upsert currency, (conditionally)
    /// issuer and asset entries. Idempotent for identical re-registration
    /// and safe to invoke concurrently for different tokens.
    pub async fn verify_token_config(&self, token: &TokenConfig) -> Result<(), TokenConfigError> {
        let asset = RippleAsset::parse(&token.contract_address)?;
        let currency = RippleCurrency::new(&asset.currency)?;

        if currency.is_native() {
            if token.decimals != NATIVE_DECIMALS {
                return Err(TokenConfigError::DecimalsMismatch {
                    want: NATIVE_DECIMALS,
                    have: token.decimals,
                });
            }
            if !asset.issuer.is_empty() {
                return Err(TokenConfigError::UnexpectedIssuer(asset.issuer.clone()));
            }
        } else {
            if asset.issuer.is_empty() {
                return Err(TokenConfigError::MissingIssuer);
            }
            let account_id = address::decode_account_id(&asset.issuer)
                .ok_or_else(|| TokenConfigError::InvalidIssuerAddress(asset.issuer.clone()))?;
            self.issuers.insert(&asset.issuer, account_id).await;
        }

        self.currencies.insert(&asset.currency, currency).await;
        self.assets.insert(&token.contract_address, asset).await;
        Ok(())
    }

    /// Registry of validated currencies, read by transaction building.
    pub fn currencies(&self) -> &Registry<RippleCurrency> {
        &self.currencies
    }

    /// Registry of validated issuer account ids.
    pub fn issuers(&self) -> &Registry<[u8; 20]> {
        &self.issuers
    }

    /// Registry of validated assets keyed by token address.
    pub fn assets(&self) -> &Registry<RippleAsset> {
        &self.assets
    }

    /// Returns the next swap nonce for an MPC owner and advances the counter.
    pub async fn next_swap_nonce(&self, owner: &str) -> u64 {
        self.nonces.next(self.chain_id, owner).await
    }

    fn verify_mpc_public_key(&self, mpc: &str, public_key_hex: &str) -> Result<(), RouterInfoError> {
        let derived = address::public_key_to_address(public_key_hex).map_err(|err| {
            RouterInfoError::MpcKeyMismatch {
                expected: mpc.to_string(),
                derived: format!("<undecodable key: {}>", err),
            }
        })?;
        if derived != mpc {
            return Err(RouterInfoError::MpcKeyMismatch {
                expected: mpc.to_string(),
                derived,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ChainAdapter for RippleAdapter {
    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    async fn set_gateway_config(&self, gateway: &GatewayConfig) -> Result<(), ConnectError> {
        self.connections.connect(gateway).await?;
        self.connections.start_reconnect_loop().await;
        Ok(())
    }

    async fn set_token_config(&self, token: &TokenConfig) {
        match self.verify_token_config(token).await {
            Ok(()) => info!(
                "Verify token config success: chain {} tokenID {} tokenAddr {} decimals {}",
                self.chain_id, token.token_id, token.contract_address, token.decimals
            ),
            Err(err) => error!(
                "Verify token config failed: chain {} tokenID {} tokenAddr {}: {}",
                self.chain_id, token.token_id, token.contract_address, err
            ),
        }
    }

    async fn init_router_info(&self, router_contract: &str) -> Result<(), RouterInfoError> {
        info!(
            "[{:>5}] start init router info: routerContract {}",
            self.chain_id, router_contract
        );
        // On ripple the router contract is the MPC custodian address
        let router_mpc = router_contract;
        if !address::is_valid_address(router_mpc) {
            warn!("Wrong router mpc address: {}", router_mpc);
            return Err(RouterInfoError::InvalidRouterAddress(router_mpc.to_string()));
        }

        let public_key = self
            .key_service
            .get_mpc_public_key(router_mpc)
            .await
            .map_err(|err| {
                warn!("Get mpc public key failed: mpc {}: {}", router_mpc, err);
                RouterInfoError::PubkeyFetchFailed {
                    mpc: router_mpc.to_string(),
                    reason: err.to_string(),
                }
            })?;

        if let Err(err) = self.verify_mpc_public_key(router_mpc, &public_key) {
            warn!(
                "Verify mpc public key failed: mpc {} mpcPubkey {}: {}",
                router_mpc, public_key, err
            );
            return Err(err);
        }

        self.directory
            .set_router_info(
                self.chain_id,
                router_contract,
                SwapRouterInfo {
                    router_mpc: router_mpc.to_string(),
                    router_wnative: None,
                },
            )
            .await;
        self.directory
            .set_mpc_public_key(router_mpc, &public_key)
            .await;
        info!(
            "[{:>5}] init router info success: routerContract {} routerMPC {}",
            self.chain_id, router_contract, router_mpc
        );

        if let Some(store) = &self.history {
            self.nonces
                .seed(self.chain_id, router_mpc, store.as_ref())
                .await?;
        }

        Ok(())
    }

    fn is_valid_address(&self, address: &str) -> bool {
        address::is_valid_address(address)
    }
}
