//! Unit tests for the router info directory and registries

use router_core::{Registry, RouterInfoDirectory, SwapRouterInfo};

const CHAIN_ID: u64 = 112233;
const ROUTER_CONTRACT: &str = "TRouterContractAddress";
const MPC_ADDR: &str = "TMpcCustodianAddress";

/// What is tested: a published binding is read back whole
/// Why: the dispatcher must never observe a partially constructed binding
#[tokio::test]
async fn test_directory_set_and_get() {
    let directory = RouterInfoDirectory::new();
    let info = SwapRouterInfo {
        router_mpc: MPC_ADDR.to_string(),
        router_wnative: Some("TWrappedNative".to_string()),
    };

    directory
        .set_router_info(CHAIN_ID, ROUTER_CONTRACT, info.clone())
        .await;
    directory.set_mpc_public_key(MPC_ADDR, "02abcdef").await;

    assert_eq!(
        directory.router_info(CHAIN_ID, ROUTER_CONTRACT).await,
        Some(info)
    );
    assert_eq!(
        directory.mpc_public_key(MPC_ADDR).await,
        Some("02abcdef".to_string())
    );
    assert!(directory.router_info(CHAIN_ID, "other").await.is_none());
}

/// What is tested: re-publishing a binding overwrites the whole value
/// Why: re-verification must replace, never merge with, a stale binding
#[tokio::test]
async fn test_directory_overwrites_binding() {
    let directory = RouterInfoDirectory::new();

    directory
        .set_router_info(
            CHAIN_ID,
            ROUTER_CONTRACT,
            SwapRouterInfo {
                router_mpc: "old-mpc".to_string(),
                router_wnative: Some("old-wnative".to_string()),
            },
        )
        .await;
    directory
        .set_router_info(
            CHAIN_ID,
            ROUTER_CONTRACT,
            SwapRouterInfo {
                router_mpc: MPC_ADDR.to_string(),
                router_wnative: None,
            },
        )
        .await;

    let info = directory
        .router_info(CHAIN_ID, ROUTER_CONTRACT)
        .await
        .unwrap();
    assert_eq!(info.router_mpc, MPC_ADDR);
    assert_eq!(info.router_wnative, None);
    assert_eq!(directory.router_count().await, 1);
}

/// What is tested: registry upserts are idempotent
/// Why: re-registering the same token must leave the registry state as a
/// single registration would
#[tokio::test]
async fn test_registry_idempotent_upsert() {
    let registry: Registry<u8> = Registry::new();

    registry.insert("USD", 6).await;
    registry.insert("USD", 6).await;

    assert_eq!(registry.len().await, 1);
    assert_eq!(registry.get("USD").await, Some(6));
    assert!(registry.contains("USD").await);
    assert!(!registry.contains("EUR").await);
}
