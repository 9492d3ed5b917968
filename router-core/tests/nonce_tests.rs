//! Unit tests for the nonce allocator

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use router_core::{
    MemoryHistoryStore, NonceAllocator, NonceError, RetryPolicy, SwapHistoryStore,
};

const CHAIN_ID: u64 = 1000005;
const OWNER: &str = "rMPCOwnerAddress";

fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        backoff_ms: 1,
        exponential: false,
    }
}

/// History store that always errors, as an unreachable backend would.
struct FailingStore;

#[async_trait]
impl SwapHistoryStore for FailingStore {
    async fn find_next_swap_nonce(&self, _chain_id: u64, _owner: &str) -> anyhow::Result<u64> {
        anyhow::bail!("store unavailable")
    }
}

/// What is tested: seed() adopts the store's answer as the counter start
/// Why: the persistent history is authoritative for the first nonce
#[tokio::test]
async fn test_seed_from_store() {
    let store = MemoryHistoryStore::new();
    store.set_next_swap_nonce(CHAIN_ID, OWNER, 42).await;

    let allocator = NonceAllocator::new(fast_retry());
    allocator.seed(CHAIN_ID, OWNER, &store).await.unwrap();

    assert_eq!(allocator.peek(CHAIN_ID, OWNER).await, Some(42));
    assert_eq!(allocator.next(CHAIN_ID, OWNER).await, 42);
    assert_eq!(allocator.next(CHAIN_ID, OWNER).await, 43);
}

/// What is tested: a successful zero answer from the store is authoritative
/// Why: a chain with no prior swap history legitimately starts at zero
#[tokio::test]
async fn test_seed_zero_is_authoritative() {
    let store = MemoryHistoryStore::new();
    let allocator = NonceAllocator::new(fast_retry());

    allocator.seed(CHAIN_ID, OWNER, &store).await.unwrap();

    assert_eq!(allocator.peek(CHAIN_ID, OWNER).await, Some(0));
    assert_eq!(allocator.next(CHAIN_ID, OWNER).await, 0);
}

/// What is tested: seed() fails hard after the retry budget is exhausted
/// Why: silently proceeding from zero against an erroring store risks
/// nonce reuse on a chain with prior swap history
#[tokio::test]
async fn test_seed_unreachable_store_is_hard_failure() {
    let allocator = NonceAllocator::new(fast_retry());

    let err = allocator
        .seed(CHAIN_ID, OWNER, &FailingStore)
        .await
        .unwrap_err();

    match err {
        NonceError::SeedUnavailable {
            chain_id,
            owner,
            attempts,
            ..
        } => {
            assert_eq!(chain_id, CHAIN_ID);
            assert_eq!(owner, OWNER);
            assert_eq!(attempts, 3);
        }
    }
    assert_eq!(allocator.peek(CHAIN_ID, OWNER).await, None);
}

/// What is tested: re-seeding an already seeded counter is a no-op
/// Why: the store is queried at most once per adapter startup per router;
/// a config reload must never rewind an in-use counter
#[tokio::test]
async fn test_seed_is_once_only() {
    let store = MemoryHistoryStore::new();
    store.set_next_swap_nonce(CHAIN_ID, OWNER, 10).await;

    let allocator = NonceAllocator::new(fast_retry());
    allocator.seed(CHAIN_ID, OWNER, &store).await.unwrap();
    assert_eq!(allocator.next(CHAIN_ID, OWNER).await, 10);

    store.set_next_swap_nonce(CHAIN_ID, OWNER, 99).await;
    allocator.seed(CHAIN_ID, OWNER, &store).await.unwrap();

    assert_eq!(allocator.next(CHAIN_ID, OWNER).await, 11);
}

/// What is tested: seed() still adopts the store's answer for a counter
/// that next() lazily created beforehand
/// Why: a lazily created counter is not seeded; skipping the store here
/// would replay every nonce between the lazy value and the store's answer
#[tokio::test]
async fn test_seed_adopts_store_after_early_next() {
    let store = MemoryHistoryStore::new();
    store.set_next_swap_nonce(CHAIN_ID, OWNER, 42).await;

    let allocator = NonceAllocator::new(fast_retry());
    assert_eq!(allocator.next(CHAIN_ID, OWNER).await, 0);

    allocator.seed(CHAIN_ID, OWNER, &store).await.unwrap();

    assert_eq!(allocator.next(CHAIN_ID, OWNER).await, 42);
    assert_eq!(allocator.next(CHAIN_ID, OWNER).await, 43);
}

/// What is tested: seeding never rewinds a counter already past the store's
/// answer
/// Why: values handed out before seeding must stay unrepeated even when the
/// store reports a smaller next nonce
#[tokio::test]
async fn test_seed_never_rewinds_advanced_counter() {
    let store = MemoryHistoryStore::new();
    store.set_next_swap_nonce(CHAIN_ID, OWNER, 2).await;

    let allocator = NonceAllocator::new(fast_retry());
    for expected in 0..5 {
        assert_eq!(allocator.next(CHAIN_ID, OWNER).await, expected);
    }

    allocator.seed(CHAIN_ID, OWNER, &store).await.unwrap();

    assert_eq!(allocator.next(CHAIN_ID, OWNER).await, 5);
}

/// What is tested: N concurrent next() calls return exactly
/// {seed, seed+1, ..., seed+N-1} with no repeats
/// Why: nonce reuse across concurrent swap submissions loses funds
#[tokio::test]
async fn test_next_concurrent_uniqueness() {
    const TASKS: u64 = 64;

    let store = MemoryHistoryStore::new();
    store.set_next_swap_nonce(CHAIN_ID, OWNER, 100).await;

    let allocator = Arc::new(NonceAllocator::new(fast_retry()));
    allocator.seed(CHAIN_ID, OWNER, &store).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..TASKS {
        let allocator = Arc::clone(&allocator);
        handles.push(tokio::spawn(async move {
            allocator.next(CHAIN_ID, OWNER).await
        }));
    }

    let mut values = HashSet::new();
    for handle in handles {
        values.insert(handle.await.unwrap());
    }

    let expected: HashSet<u64> = (100..100 + TASKS).collect();
    assert_eq!(values, expected);
}

/// What is tested: counters for different (chain, owner) pairs are independent
/// Why: nonce uniqueness is scoped per pair, not process-global
#[tokio::test]
async fn test_next_independent_pairs() {
    let allocator = NonceAllocator::new(fast_retry());

    assert_eq!(allocator.next(1, "owner-a").await, 0);
    assert_eq!(allocator.next(1, "owner-b").await, 0);
    assert_eq!(allocator.next(2, "owner-a").await, 0);
    assert_eq!(allocator.next(1, "owner-a").await, 1);
}
