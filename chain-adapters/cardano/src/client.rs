//! Cardano Client Module
//!
//! GraphQL-over-HTTP client for one cardano endpoint. Liveness is observed
//! lazily: the flag flips to disconnected when a query fails and the
//! connection manager replaces the whole handle on reconnect.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use router_core::{EndpointConnection, EndpointConnector};

use crate::types::{Tip, Utxo};

#[derive(Debug, Serialize)]
struct GraphqlRequest {
    query: String,
    variables: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct TipData {
    cardano: TipCardano,
}

#[derive(Debug, Deserialize)]
struct TipCardano {
    tip: Tip,
}

#[derive(Debug, Deserialize)]
struct UtxosData {
    utxos: Vec<Utxo>,
}

/// One live connection to a cardano endpoint.
pub struct CardanoClient {
    client: Client,
    url: String,
    alive: AtomicBool,
}

impl CardanoClient {
    /// Connects to a cardano endpoint, probing it with a tip query.
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
            .query_tip()
            .await
            .context("initial tip probe failed")?;
        Ok(connection)
    }

    async fn query<T: serde::de::DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let request = GraphqlRequest {
            query: query.to_string(),
            variables,
        };

        let result = async {
            let response: GraphqlResponse<T> = self
                .client
                .post(&self.url)
                .json(&request)
                .send()
                .await
                .context("Failed to send graphql request")?
                .json()
                .await
                .context("Failed to parse graphql response")?;

            if let Some(errors) = response.errors {
                let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
                anyhow::bail!("graphql error: {}", messages.join("; "));
            }
            response
                .data
                .ok_or_else(|| anyhow::anyhow!("graphql answer carried no data"))
        }
        .await;

        match result {
            Ok(data) => {
                self.alive.store(true, Ordering::SeqCst);
                Ok(data)
            }
            Err(err) => {
                warn!("graphql query failed for {}: {}", self.url, err);
                self.alive.store(false, Ordering::SeqCst);
                Err(err)
            }
        }
    }

    /// Queries the chain tip.
    pub async fn query_tip(&self) -> Result<Tip> {
        let data: TipData = self
            .query(
                "{ cardano { tip { number slotNo hash } } }",
                serde_json::json!({}),
            )
            .await?;
        Ok(data.cardano.tip)
    }

    /// Queries the spendable outputs of an address.
    pub async fn utxos(&self, address: &str) -> Result<Vec<Utxo>> {
        let data: UtxosData = self
            .query(
                "query UtxosByAddress($address: String!) { \
                 utxos(where: { address: { _eq: $address } }) { txHash index value } }",
                serde_json::json!({ "address": address }),
            )
            .await?;
        Ok(data.utxos)
    }
}

impl EndpointConnection for CardanoClient {
    fn endpoint(&self) -> &str {
        &self.url
    }

    fn is_connected(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }
}

/// Connection factory for cardano endpoints.
pub struct CardanoConnector {
    timeout: Duration,
}

impl CardanoConnector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl EndpointConnector for CardanoConnector {
    type Connection = CardanoClient;

    async fn connect(&self, address: &str) -> Result<CardanoClient> {
        CardanoClient::connect(address, self.timeout).await
    }
}
