//! Tron Adapter Module
//!
//! Composition root for the contract-account chain. Unlike ripple and
//! cardano, the router contract is distinct from the MPC custodian: the
//! custodian and wrapped-native token addresses are read from the contract
//! itself before the key-to-address cross-check.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use router_core::{
    ChainAdapter, ConnectError, ConnectionManager, ConnectionSettings, GatewayConfig,
    MpcKeyService, NonceAllocator, Registry, RouterInfoDirectory, RouterInfoError,
    SwapHistoryStore, SwapRouterInfo, TokenConfig, TokenConfigError,
};

use crate::address;
use crate::client::TronConnector;

/// Chain id of the tron mainnet.
pub const MAINNET_CHAIN_ID: u64 = 112233;

/// Chain id of the shasta testnet.
pub const SHASTA_CHAIN_ID: u64 = 2494104990;

/// Whether the chain id names a tron network.
pub fn supports_chain_id(chain_id: u64) -> bool {
    matches!(chain_id, MAINNET_CHAIN_ID | SHASTA_CHAIN_ID)
}

/// Chain adapter for a tron-style contract-account chain.
pub struct TronAdapter {
    chain_id: u64,
    connections: Arc<ConnectionManager<TronConnector>>,
    tokens: Registry<TokenConfig>,
    directory: Arc<RouterInfoDirectory>,
    key_service: Arc<dyn MpcKeyService>,
    history: Option<Arc<dyn SwapHistoryStore>>,
    nonces: NonceAllocator,
}

impl TronAdapter {
    /// Creates an adapter wired to its collaborators. Fails on a chain id
    /// that names no tron network.
    pub fn new(
        chain_id: u64,
        settings: ConnectionSettings,
        directory: Arc<RouterInfoDirectory>,
        key_service: Arc<dyn MpcKeyService>,
        history: Option<Arc<dyn SwapHistoryStore>>,
    ) -> anyhow::Result<Self> {
        if !supports_chain_id(chain_id) {
            anyhow::bail!("unsupported tron chain id {}", chain_id);
        }
        let connector = TronConnector::new(settings.rpc_timeout());
        let nonces = NonceAllocator::new(settings.retry.clone());
        Ok(Self {
            chain_id,
            connections: Arc::new(ConnectionManager::new(connector, settings)),
            tokens: Registry::new(),
            directory,
            key_service,
            history,
            nonces,
        })
    }

    /// The adapter's connection manager, for RPC callers picking endpoints.
    pub fn connections(&self) -> &Arc<ConnectionManager<TronConnector>> {
        &self.connections
    }

    /// Registry of validated token configs keyed by contract address.
    pub fn tokens(&self) -> &Registry<TokenConfig> {
        &self.tokens
    }

    /// Returns the next swap nonce for an MPC owner and advances the counter.
    pub async fn next_swap_nonce(&self, owner: &str) -> u64 {
        self.nonces.next(self.chain_id, owner).await
    }

    /// Validates one token config and populates the token registry.
    pub async fn verify_token_config(&self, token: &TokenConfig) -> Result<(), TokenConfigError> {
        if !address::is_valid_address(&token.contract_address) {
            return Err(TokenConfigError::MalformedAssetAddress(
                token.contract_address.clone(),
            ));
        }
        self.tokens
            .insert(&token.contract_address, token.clone())
            .await;
        Ok(())
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
impl ChainAdapter for TronAdapter {
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
        if !address::is_valid_address(router_contract) {
            warn!("Wrong router contract address: {}", router_contract);
            return Err(RouterInfoError::InvalidRouterAddress(
                router_contract.to_string(),
            ));
        }

        let connection = self.connections.first_available().await.ok_or_else(|| {
            RouterInfoError::MpcResolutionFailed {
                router_contract: router_contract.to_string(),
                reason: "no live endpoint".to_string(),
            }
        })?;

        // wNATIVE absence is survivable, an unresolvable custodian is not
        let router_wnative = match connection.get_wnative_address(router_contract).await {
            Ok(wnative) => Some(wnative),
            Err(err) => {
                warn!(
                    "Get router wNative address failed: routerContract {}: {}",
                    router_contract, err
                );
                None
            }
        };

        let router_mpc = connection
            .get_mpc_address(router_contract)
            .await
            .map_err(|err| {
                warn!(
                    "Get router mpc address failed: routerContract {}: {}",
                    router_contract, err
                );
                RouterInfoError::MpcResolutionFailed {
                    router_contract: router_contract.to_string(),
                    reason: err.to_string(),
                }
            })?;
        if !address::is_valid_address(&router_mpc) {
            warn!(
                "Get router mpc address returned an invalid address: routerContract {} routerMPC {}",
                router_contract, router_mpc
            );
            return Err(RouterInfoError::MpcResolutionFailed {
                router_contract: router_contract.to_string(),
                reason: format!("resolved invalid mpc address {}", router_mpc),
            });
        }
        info!(
            "Get router mpc address success: routerContract {} routerMPC {}",
            router_contract, router_mpc
        );

        let public_key = self
            .key_service
            .get_mpc_public_key(&router_mpc)
            .await
            .map_err(|err| {
                warn!("Get mpc public key failed: mpc {}: {}", router_mpc, err);
                RouterInfoError::PubkeyFetchFailed {
                    mpc: router_mpc.clone(),
                    reason: err.to_string(),
                }
            })?;

        if let Err(err) = self.verify_mpc_public_key(&router_mpc, &public_key) {
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
                    router_mpc: router_mpc.clone(),
                    router_wnative: router_wnative.clone(),
                },
            )
            .await;
        self.directory
            .set_mpc_public_key(&router_mpc, &public_key)
            .await;
        info!(
            "[{:>5}] init router info success: routerContract {} routerMPC {} routerWNative {:?}",
            self.chain_id, router_contract, router_mpc, router_wnative
        );

        if let Some(store) = &self.history {
            self.nonces
                .seed(self.chain_id, &router_mpc, store.as_ref())
                .await?;
        }

        Ok(())
    }

    fn is_valid_address(&self, address: &str) -> bool {
        address::is_valid_address(address)
    }
}
