//! Ripple Remote Client Module
//!
//! JSON-RPC client for one ripple node endpoint. A remote tracks its own
//! liveness lazily: the flag flips to disconnected when an RPC fails, and
//! the connection manager replaces the whole handle on reconnect.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use router_core::{EndpointConnection, EndpointConnector};

/// Ripple JSON-RPC request wrapper
#[derive(Debug, Serialize)]
struct RpcRequest {
    method: String,
    params: Vec<serde_json::Value>,
}

/// Ripple JSON-RPC response wrapper
#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: RpcResult<T>,
}

#[derive(Debug, Deserialize)]
struct RpcResult<T> {
    status: Option<String>,
    error: Option<String>,
    #[serde(flatten)]
    body: T,
}

#[derive(Debug, Deserialize)]
struct ServerInfoBody {
    info: Option<ServerInfo>,
}

/// Subset of the node's server_info answer used for liveness probing.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerInfo {
    pub build_version: Option<String>,
    pub complete_ledgers: Option<String>,
    pub server_state: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AccountInfoBody {
    account_data: Option<AccountData>,
}

/// Subset of an account_info answer: the fields transaction building reads.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountData {
    #[serde(rename = "Account")]
    pub account: String,
    #[serde(rename = "Sequence")]
    pub sequence: u32,
    #[serde(rename = "Balance")]
    pub balance: Option<String>,
}

/// One live connection to a ripple node.
pub struct RippleRemote {
    client: Client,
    url: String,
    alive: AtomicBool,
}

impl RippleRemote {
    /// Connects to a ripple node, probing it with server_info.
    pub async fn connect(url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;
        let remote = Self {
            client,
            url: url.to_string(),
            alive: AtomicBool::new(true),
        };
        remote
            .server_info()
            .await
            .context("initial server_info probe failed")?;
        Ok(remote)
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T> {
        let request = RpcRequest {
            method: method.to_string(),
            params: vec![params],
        };

        let result = async {
            let response: RpcResponse<T> = self
                .client
                .post(&self.url)
                .json(&request)
                .send()
                .await
                .with_context(|| format!("Failed to send {} request", method))?
                .json()
                .await
                .with_context(|| format!("Failed to parse {} response", method))?;

            if response.result.status.as_deref() != Some("success") {
                let reason = response
                    .result
                    .error
                    .unwrap_or_else(|| "unknown error".to_string());
                anyhow::bail!("{} failed: {}", method, reason);
            }
            Ok(response.result.body)
        }
        .await;

        match result {
            Ok(body) => {
                self.alive.store(true, Ordering::SeqCst);
                Ok(body)
            }
            Err(err) => {
                warn!("{} failed for {}: {}", method, self.url, err);
                self.alive.store(false, Ordering::SeqCst);
                Err(err)
            }
        }
    }

    /// Queries the node's server_info.
    pub async fn server_info(&self) -> Result<ServerInfo> {
        let body: ServerInfoBody = self.call("server_info", serde_json::json!({})).await?;
        body.info
            .ok_or_else(|| anyhow::anyhow!("server_info answer carried no info"))
    }

    /// Queries the account data (sequence, balance) of a ledger account.
    pub async fn account_info(&self, account: &str) -> Result<AccountData> {
        let body: AccountInfoBody = self
            .call(
                "account_info",
                serde_json::json!({ "account": account, "ledger_index": "validated" }),
            )
            .await?;
        body.account_data
            .ok_or_else(|| anyhow::anyhow!("account_info answer carried no account_data"))
    }
}

impl EndpointConnection for RippleRemote {
    fn endpoint(&self) -> &str {
        &self.url
    }

    fn is_connected(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }
}

/// Connection factory for ripple endpoints.
pub struct RippleConnector {
    timeout: Duration,
}

impl RippleConnector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl EndpointConnector for RippleConnector {
    type Connection = RippleRemote;

    async fn connect(&self, address: &str) -> Result<RippleRemote> {
        RippleRemote::connect(address, self.timeout).await
    }
}
