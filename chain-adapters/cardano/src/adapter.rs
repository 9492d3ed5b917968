//! Cardano Adapter Module
//!
//! Composition root for the UTXO-model chain. Like ripple, the router
//! contract address is the MPC custodian address itself; trust rests on the
//! payment key hashing to the claimed enterprise address. Token configs are
//! asset ids, validated into a single asset registry.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use router_core::{
    ChainAdapter, ConnectError, ConnectionManager, ConnectionSettings, GatewayConfig,
    MpcKeyService, NonceAllocator, Registry, RouterInfoDirectory, RouterInfoError,
    SwapHistoryStore, SwapRouterInfo, TokenConfig, TokenConfigError,
};

use crate::address;
use crate::client::CardanoConnector;
use crate::types::{CardanoAsset, NATIVE_DECIMALS};

/// Chain adapter for a cardano-style UTXO chain.
pub struct CardanoAdapter {
    chain_id: u64,
    connections: Arc<ConnectionManager<CardanoConnector>>,
    assets: Registry<CardanoAsset>,
    directory: Arc<RouterInfoDirectory>,
    key_service: Arc<dyn MpcKeyService>,
    history: Option<Arc<dyn SwapHistoryStore>>,
    nonces: NonceAllocator,
}

impl CardanoAdapter {
    /// Creates an adapter wired to its collaborators.
    pub fn new(
        chain_id: u64,
        settings: ConnectionSettings,
        directory: Arc<RouterInfoDirectory>,
        key_service: Arc<dyn MpcKeyService>,
        history: Option<Arc<dyn SwapHistoryStore>>,
    ) -> Self {
        let connector = CardanoConnector::new(settings.rpc_timeout());
        let nonces = NonceAllocator::new(settings.retry.clone());
        Self {
            chain_id,
            connections: Arc::new(ConnectionManager::new(connector, settings)),
            assets: Registry::new(),
            directory,
            key_service,
            history,
            nonces,
        }
    }

    /// The adapter's connection manager, for RPC callers picking endpoints.
    pub fn connections(&self) -> &Arc<ConnectionManager<CardanoConnector>> {
        &self.connections
    }

    /// Registry of validated assets keyed by asset id.
    pub fn assets(&self) -> &Registry<CardanoAsset> {
        &self.assets
    }

    /// Returns the next swap nonce for an MPC owner and advances the counter.
    pub async fn next_swap_nonce(&self, owner: &str) -> u64 {
        self.nonces.next(self.chain_id, owner).await
    }

    /// Validates one token config and populates the asset registry.
    pub async fn verify_token_config(&self, token: &TokenConfig) -> Result<(), TokenConfigError> {
        let asset = CardanoAsset::parse(&token.contract_address)?;
        if asset.is_native() && token.decimals != NATIVE_DECIMALS {
            return Err(TokenConfigError::DecimalsMismatch {
                want: NATIVE_DECIMALS,
                have: token.decimals,
            });
        }
        self.assets.insert(&token.contract_address, asset).await;
        Ok(())
    }

    fn verify_mpc_public_key(&self, mpc: &str, public_key_hex: &str) -> Result<(), RouterInfoError> {
        let mainnet = !address::is_testnet_address(mpc);
        let derived =
            address::public_key_to_address(public_key_hex, mainnet).map_err(|err| {
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
impl ChainAdapter for CardanoAdapter {
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
        // On cardano the router contract is the MPC custodian address
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
