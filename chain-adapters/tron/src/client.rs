//! Tron Client Module
//!
//! JSON-RPC client for one tron endpoint, speaking the ethereum-compatible
//! surface (eth_blockNumber, eth_call). Router contract reads are plain
//! four-byte-selector calls whose answers decode to addresses. Liveness is
//! observed lazily: the flag flips to disconnected when a call fails and
//! the connection manager replaces the whole handle on reconnect.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use tracing::warn;

use router_core::{EndpointConnection, EndpointConnector};

use crate::address;

#[derive(Debug, Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: Vec<serde_json::Value>,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

/// First four bytes of the keccak256 hash of a solidity signature.
pub fn function_selector(signature: &str) -> [u8; 4] {
    let digest = Keccak256::digest(signature.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

/// One live connection to a tron endpoint.
pub struct TronClient {
    client: Client,
    url: String,
    alive: AtomicBool,
}

impl TronClient {
    /// Connects to a tron endpoint, probing it with a block number query.
    pub async fn connect(url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        let connection = Self {
            client,
            url: url.to_string(),
            alive: AtomicBool::new(true),
        };
        connection
            .get_block_number()
            .await
            .context("initial block number probe failed")?;
        Ok(connection)
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<T> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
            id: 1,
        };

        let result = async {
            let response: JsonRpcResponse<T> = self
                .client
                .post(&self.url)
                .json(&request)
                .send()
                .await
                .with_context(|| format!("Failed to send {} request", method))?
                .json()
                .await
                .with_context(|| format!("Failed to parse {} response", method))?;

            if let Some(error) = response.error {
                anyhow::bail!("{} failed: {} ({})", method, error.message, error.code);
            }
            response
                .result
                .ok_or_else(|| anyhow::anyhow!("{} answer carried no result", method))
        }
        .await;

        match result {
            Ok(value) => {
                self.alive.store(true, Ordering::SeqCst);
                Ok(value)
            }
            Err(err) => {
                warn!("rpc call failed for {}: {}", self.url, err);
                self.alive.store(false, Ordering::SeqCst);
                Err(err)
            }
        }
    }

    /// Queries the current block number.
    pub async fn get_block_number(&self) -> Result<u64> {
        let block_hex: String = self.call("eth_blockNumber", vec![]).await?;
        u64::from_str_radix(block_hex.trim_start_matches("0x"), 16)
            .context("Failed to parse block number")
    }

    /// Calls a zero-argument contract getter whose answer is one address.
    async fn read_address_getter(&self, contract: &str, signature: &str) -> Result<String> {
        let to = address::to_eth_hex(contract)
            .ok_or_else(|| anyhow::anyhow!("invalid contract address {}", contract))?;
        let data = format!("0x{}", hex::encode(function_selector(signature)));

        let answer: String = self
            .call(
                "eth_call",
                vec![
                    serde_json::json!({ "to": to, "data": data }),
                    serde_json::json!("latest"),
                ],
            )
            .await?;

        let word = hex::decode(answer.trim_start_matches("0x"))
            .with_context(|| format!("{} answer is not valid hex", signature))?;
        if word.len() != 32 {
            anyhow::bail!("{} answer is not one abi word", signature);
        }
        Ok(address::from_account_bytes(&word[12..]))
    }

    /// Reads the MPC custodian address from the router contract.
    pub async fn get_mpc_address(&self, router_contract: &str) -> Result<String> {
        self.read_address_getter(router_contract, "mpc()").await
    }

    /// Reads the wrapped-native token address from the router contract.
    pub async fn get_wnative_address(&self, router_contract: &str) -> Result<String> {
        self.read_address_getter(router_contract, "wNATIVE()").await
    }
}

impl EndpointConnection for TronClient {
    fn endpoint(&self) -> &str {
        &self.url
    }

    fn is_connected(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }
}

/// Connection factory for tron endpoints.
pub struct TronConnector {
    timeout: Duration,
}

impl TronConnector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl EndpointConnector for TronConnector {
    type Connection = TronClient;

    async fn connect(&self, address: &str) -> Result<TronClient> {
        TronClient::connect(address, self.timeout).await
    }
}
