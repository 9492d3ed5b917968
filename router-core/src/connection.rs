//! Connection Manager Module
//!
//! Owns the set of live endpoint connections for one chain adapter.
//! Performs the initial connect-with-retry over the deduplicated gateway
//! address list and runs a background reconnect loop for the adapter's
//! lifetime. The connection set is mutated only by the manager; concurrent
//! RPC callers pick an available endpoint at call time and must never cache
//! a handle across calls.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{watch, Mutex, RwLock};
use tracing::{error, info, warn};

use crate::config::{ConnectionSettings, GatewayConfig};
use crate::error::ConnectError;

/// A live connection handle to one remote chain node.
///
/// Liveness is observed lazily: a handle reports disconnected once an RPC
/// on it has failed, and the reconnect loop replaces it (the handle itself
/// is never mutated back to connected).
pub trait EndpointConnection: Send + Sync {
    /// Endpoint address this connection was created from
    fn endpoint(&self) -> &str;
    /// Whether the connection still considers itself usable
    fn is_connected(&self) -> bool;
}

/// Chain-specific connection factory.
#[async_trait]
pub trait EndpointConnector: Send + Sync + 'static {
    type Connection: EndpointConnection + 'static;

    /// Establishes a new connection to the given endpoint address.
    async fn connect(&self, address: &str) -> anyhow::Result<Self::Connection>;
}

struct ReconnectTask {
    stop: watch::Sender<bool>,
    handle: tokio::task::JoinHandle<()>,
}

/// Manages the endpoint connection set for one chain adapter.
pub struct ConnectionManager<C: EndpointConnector> {
    connector: C,
    settings: ConnectionSettings,
    /// Gateway address list the reconnect loop scans (set by `connect`)
    addresses: RwLock<Vec<String>>,
    /// Live connections keyed by endpoint address
    connections: RwLock<HashMap<String, Arc<C::Connection>>>,
    /// Background reconnect task, armed at most once per adapter lifetime
    reconnect_task: Mutex<Option<ReconnectTask>>,
}

impl<C: EndpointConnector> ConnectionManager<C> {
    /// Creates a new connection manager around a chain-specific connector.
    pub fn new(connector: C, settings: ConnectionSettings) -> Self {
        Self {
            connector,
            settings,
            addresses: RwLock::new(Vec::new()),
            connections: RwLock::new(HashMap::new()),
            reconnect_task: Mutex::new(None),
        }
    }

    /// Establishes connections to every address in the combined
    /// primary+extended gateway sequence.
    ///
    /// Each address gets up to `retry.max_attempts` connect attempts with
    /// the configured backoff between them; an address that never connects
    /// is simply absent from the resulting set. Fails only when the entire
    /// set ends up empty, which makes adapter startup impossible.
    pub async fn connect(&self, gateway: &GatewayConfig) -> Result<(), ConnectError> {
        let addresses = gateway.combined_addresses();
        let mut connected = HashMap::new();

        for address in &addresses {
            for attempt in 0..self.settings.retry.max_attempts {
                match self.connector.connect(address).await {
                    Ok(connection) => {
                        info!("Connected to remote api success: {}", address);
                        connected.insert(address.clone(), Arc::new(connection));
                        break;
                    }
                    Err(err) => {
                        warn!(
                            "Cannot connect to remote api {} (attempt {}/{}): {}",
                            address,
                            attempt + 1,
                            self.settings.retry.max_attempts,
                            err
                        );
                        if attempt + 1 < self.settings.retry.max_attempts {
                            tokio::time::sleep(self.settings.retry.delay(attempt)).await;
                        }
                    }
                }
            }
        }

        if connected.is_empty() {
            error!(
                "No available remote api: all {} configured addresses failed",
                addresses.len()
            );
            return Err(ConnectError::NoEndpoints {
                attempted: addresses.len(),
            });
        }

        info!(
            "Connected remotes: {:?}",
            connected.keys().collect::<Vec<_>>()
        );
        *self.addresses.write().await = addresses;
        *self.connections.write().await = connected;
        Ok(())
    }

    /// Runs one reconnect cycle over the configured gateway addresses.
    ///
    /// Every address whose connection reports disconnected (or which never
    /// connected at startup) gets exactly one reconnect attempt; success
    /// replaces the old handle, failure leaves the address for the next
    /// cycle.
    pub async fn reconnect_once(&self) {
        let addresses = self.addresses.read().await.clone();
        for address in addresses {
            let alive = {
                let connections = self.connections.read().await;
                connections
                    .get(&address)
                    .map(|c| c.is_connected())
                    .unwrap_or(false)
            };
            if alive {
                continue;
            }
            match self.connector.connect(&address).await {
                Ok(connection) => {
                    info!("Reconnect to remote api success: {}", address);
                    self.connections
                        .write()
                        .await
                        .insert(address.clone(), Arc::new(connection));
                }
                Err(err) => {
                    warn!("Reconnect to remote api failed: {}: {}", address, err);
                }
            }
        }
    }

    /// Arms the background reconnect loop.
    ///
    /// Idempotent: a second call on an adapter whose loop is already running
    /// is a no-op, so config re-application never stacks loops. The loop
    /// wakes every `reconnect_interval_ms` and runs one reconnect cycle
    /// until `shutdown` is called.
    pub async fn start_reconnect_loop(self: &Arc<Self>) {
        let mut guard = self.reconnect_task.lock().await;
        if guard.is_some() {
            return;
        }

        let (stop_tx, mut stop_rx) = watch::channel(false);
        let manager = Arc::clone(self);
        let interval = std::time::Duration::from_millis(self.settings.reconnect_interval_ms);
        let handle = tokio::spawn(async move {
            info!("Starting reconnect loop (interval: {:?})", interval);
            loop {
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {
                        manager.reconnect_once().await;
                    }
                    _ = stop_rx.changed() => {
                        if *stop_rx.borrow() {
                            info!("Reconnect loop stopped");
                            break;
                        }
                    }
                }
            }
        });

        *guard = Some(ReconnectTask {
            stop: stop_tx,
            handle,
        });
    }

    /// Whether the background reconnect loop is currently armed.
    pub async fn reconnect_loop_running(&self) -> bool {
        self.reconnect_task.lock().await.is_some()
    }

    /// Stops the background reconnect loop at adapter shutdown.
    pub async fn shutdown(&self) {
        let task = self.reconnect_task.lock().await.take();
        if let Some(task) = task {
            let _ = task.stop.send(true);
            let _ = task.handle.await;
        }
    }

    /// Returns the connection for a specific endpoint address, if present.
    pub async fn get(&self, address: &str) -> Option<Arc<C::Connection>> {
        self.connections.read().await.get(address).cloned()
    }

    /// Returns the first connection that reports itself connected, scanning
    /// in gateway priority order.
    pub async fn first_available(&self) -> Option<Arc<C::Connection>> {
        let addresses = self.addresses.read().await.clone();
        let connections = self.connections.read().await;
        for address in &addresses {
            if let Some(connection) = connections.get(address) {
                if connection.is_connected() {
                    return Some(Arc::clone(connection));
                }
            }
        }
        None
    }

    /// Addresses currently present in the connection set, in gateway order.
    pub async fn connected_addresses(&self) -> Vec<String> {
        let addresses = self.addresses.read().await.clone();
        let connections = self.connections.read().await;
        addresses
            .into_iter()
            .filter(|a| connections.contains_key(a))
            .collect()
    }

    /// Number of entries in the connection set.
    pub async fn len(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Whether the connection set is empty.
    pub async fn is_empty(&self) -> bool {
        self.connections.read().await.is_empty()
    }
}
