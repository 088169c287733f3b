//! Time-to-live memoization of lookup results.
//!
//! Each memoized operation owns one [`TtlCache`], keyed by its argument tuple.
//! Only successful results are stored; a failed lookup is retried on the next
//! call. Entries are never invalidated on upstream change, so data can be up
//! to one TTL stale.

use std::future::Future;
use std::hash::Hash;
use std::time::Duration;

use mini_moka::sync::Cache;
use tracing::debug;

pub struct TtlCache<K, V> {
    name: &'static str,
    inner: Cache<K, V>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Entries expire `ttl` after insertion; at most `max_entries` are kept.
    pub fn with_ttl(name: &'static str, ttl: Duration, max_entries: u64) -> Self {
        Self {
            name,
            inner: Cache::builder()
                .max_capacity(max_entries)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Like [`TtlCache::with_ttl`], but capacity is measured by `weigher`
    /// instead of entry count.
    pub fn weighted(
        name: &'static str,
        ttl: Duration,
        max_weight: u64,
        weigher: impl Fn(&K, &V) -> u32 + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            inner: Cache::builder()
                .max_capacity(max_weight)
                .weigher(weigher)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Return the cached value or compute, store, and return a fresh one.
    ///
    /// Concurrent misses for one key may each run `load`; the last result wins.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: K, load: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.inner.get(&key) {
            debug!(cache = self.name, "cache hit");
            return Ok(value);
        }

        debug!(cache = self.name, "cache miss");
        let value = load().await?;
        self.inner.insert(key, value.clone());
        Ok(value)
    }
}
