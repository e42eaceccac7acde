//! Single-flight memo cache for answer-producing calls.
//!
//! The upstream API is slow and metered, so identical queries within a
//! process lifetime reuse the first answer. Semantics, stated explicitly:
//!
//! - **Single-flight**: concurrent calls with the same key share one
//!   in-flight computation instead of issuing duplicate network requests.
//! - **Errors are not cached**: a failed computation leaves the slot empty
//!   and the next caller retries.
//! - **Eviction**: fixed capacity; inserting a new key into a full map
//!   clears the whole map. Coarse on purpose — entries are small, the
//!   workload is interactive, and the policy is trivial to reason about.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};

pub(crate) struct AnswerCache<K, V> {
    slots: Mutex<HashMap<K, Arc<OnceCell<V>>>>,
    capacity: usize,
}

impl<K, V> AnswerCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            capacity,
        }
    }

    /// Returns the value for `key`, computing it via `init` at most once
    /// across all concurrent callers of that key. An `Err` from `init`
    /// propagates to the caller and leaves the slot uninitialized.
    pub async fn get_or_try_compute<E, F, Fut>(&self, key: K, init: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let cell = {
            let mut slots = self.slots.lock().await;
            if !slots.contains_key(&key) && slots.len() >= self.capacity {
                slots.clear();
            }
            slots
                .entry(key)
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        cell.get_or_try_init(init).await.cloned()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn concurrent_identical_calls_share_one_computation() {
        let cache: AnswerCache<&str, u32> = AnswerCache::new(10);
        let calls = AtomicUsize::new(0);

        let compute = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            Ok::<_, ()>(7)
        };

        let (a, b) = tokio::join!(
            cache.get_or_try_compute("k", compute),
            cache.get_or_try_compute("k", compute),
        );

        assert_eq!(a, Ok(7));
        assert_eq!(b, Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let cache: AnswerCache<&str, u32> = AnswerCache::new(10);

        let failed: Result<u32, &str> = cache
            .get_or_try_compute("k", || async { Err("upstream down") })
            .await;
        assert!(failed.is_err());

        let ok = cache
            .get_or_try_compute("k", || async { Ok::<_, &str>(1) })
            .await;
        assert_eq!(ok, Ok(1));
    }

    #[tokio::test]
    async fn full_map_is_cleared_on_new_key() {
        let cache: AnswerCache<u32, u32> = AnswerCache::new(2);
        for k in 0..2 {
            let _ = cache
                .get_or_try_compute(k, || async { Ok::<_, ()>(k) })
                .await;
        }
        assert_eq!(cache.len().await, 2);

        let _ = cache
            .get_or_try_compute(9, || async { Ok::<_, ()>(9) })
            .await;
        assert_eq!(cache.len().await, 1);
    }
}
