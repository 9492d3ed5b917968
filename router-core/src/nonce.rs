//! Nonce Allocator Module
//!
//! Allocates swap sequence numbers per (chain, MPC owner) pair. A counter
//! is seeded once from the persistent history store during router-info
//! initialization and then advanced monotonically in-process; `next` never
//! returns the same value twice for a pair within the process lifetime.
//! The counter is not persisted back from here.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::config::RetryPolicy;
use crate::error::NonceError;
use crate::history::SwapHistoryStore;

/// One counter with an explicit seeded marker.
///
/// A counter lazily created by `next()` before router-info initialization
/// is NOT seeded: `seed()` must still adopt the store's answer for it, or
/// every nonce between the lazy value and the store's value would be reused.
struct Counter {
    value: AtomicU64,
    seeded: AtomicBool,
}

impl Counter {
    fn unseeded() -> Self {
        Self {
            value: AtomicU64::new(0),
            seeded: AtomicBool::new(false),
        }
    }
}

/// Per-(chain, owner) monotonic swap nonce counters.
pub struct NonceAllocator {
    counters: RwLock<HashMap<(u64, String), Arc<Counter>>>,
    retry: RetryPolicy,
}

impl NonceAllocator {
    /// Creates an allocator with the given seeding retry policy.
    pub fn new(retry: RetryPolicy) -> Self {
        Self {
            counters: RwLock::new(HashMap::new()),
            retry,
        }
    }

    async fn counter(&self, chain_id: u64, owner: &str) -> Arc<Counter> {
        {
            let counters = self.counters.read().await;
            if let Some(counter) = counters.get(&(chain_id, owner.to_string())) {
                return Arc::clone(counter);
            }
        }
        let mut counters = self.counters.write().await;
        Arc::clone(
            counters
                .entry((chain_id, owner.to_string()))
                .or_insert_with(|| Arc::new(Counter::unseeded())),
        )
    }

    /// Seeds the counter for (chain, owner) from the history store.
    ///
    /// Fetches the next unused swap nonce with a bounded retry budget; a
    /// successful fetch, zero included, is authoritative. A store that keeps
    /// erroring is a hard failure: proceeding from zero on a chain with
    /// prior swap history would risk nonce reuse.
    ///
    /// The store is queried at most once per (chain, owner) per process:
    /// re-seeding an already seeded counter is a no-op, so a config reload
    /// never rewinds an in-use counter. A counter that only exists because
    /// `next()` ran before seeding is not considered seeded; the store's
    /// answer is adopted for it via a monotonic max, so values already
    /// handed out stay unrepeated.
    pub async fn seed(
        &self,
        chain_id: u64,
        owner: &str,
        store: &dyn SwapHistoryStore,
    ) -> Result<(), NonceError> {
        {
            let counters = self.counters.read().await;
            if let Some(counter) = counters.get(&(chain_id, owner.to_string())) {
                if counter.seeded.load(Ordering::SeqCst) {
                    info!(
                        "Swap nonce for chain {} owner {} already seeded, skipping",
                        chain_id, owner
                    );
                    return Ok(());
                }
            }
        }

        let mut last_err = String::new();
        for attempt in 0..self.retry.max_attempts {
            match store.find_next_swap_nonce(chain_id, owner).await {
                Ok(nonce) => {
                    info!(
                        "Seeded swap nonce for chain {} owner {}: {}",
                        chain_id, owner, nonce
                    );
                    let counter = self.counter(chain_id, owner).await;
                    counter.value.fetch_max(nonce, Ordering::SeqCst);
                    counter.seeded.store(true, Ordering::SeqCst);
                    return Ok(());
                }
                Err(err) => {
                    warn!(
                        "Find next swap nonce failed for chain {} owner {} (attempt {}/{}): {}",
                        chain_id,
                        owner,
                        attempt + 1,
                        self.retry.max_attempts,
                        err
                    );
                    last_err = err.to_string();
                    if attempt + 1 < self.retry.max_attempts {
                        tokio::time::sleep(self.retry.delay(attempt)).await;
                    }
                }
            }
        }

        error!(
            "Swap nonce seeding failed for chain {} owner {} after {} attempts",
            chain_id, owner, self.retry.max_attempts
        );
        Err(NonceError::SeedUnavailable {
            chain_id,
            owner: owner.to_string(),
            attempts: self.retry.max_attempts,
            reason: last_err,
        })
    }

    /// Returns the current nonce for (chain, owner) and advances it by one.
    ///
    /// Safe under concurrent invocation: every caller observes a distinct
    /// value. An unseeded pair starts at zero (and remains eligible for a
    /// later `seed()`).
    pub async fn next(&self, chain_id: u64, owner: &str) -> u64 {
        let counter = self.counter(chain_id, owner).await;
        counter.value.fetch_add(1, Ordering::SeqCst)
    }

    /// Current counter value without advancing it, if the pair is known.
    pub async fn peek(&self, chain_id: u64, owner: &str) -> Option<u64> {
        let counters = self.counters.read().await;
        counters
            .get(&(chain_id, owner.to_string()))
            .map(|c| c.value.load(Ordering::SeqCst))
    }
}

impl Default for NonceAllocator {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}
