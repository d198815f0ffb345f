//! Bounded in-memory resolution cache backed by Moka.

use async_trait::async_trait;
use moka::future::Cache;
use moka::policy::EvictionPolicy;
use tracing::{debug, trace};

use super::service::LinkCache;
use crate::domain::entities::CachedLink;

/// Default number of entries kept in the cache.
pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// LRU cache of resolved links.
///
/// Capacity bounds memory to the working set of hot tokens; the least
/// recently used entry is evicted first. Entries have no TTL since links
/// never change after creation.
#[derive(Debug, Clone)]
pub struct MokaLinkCache {
    cache: Cache<String, CachedLink>,
    max_capacity: u64,
}

impl MokaLinkCache {
    /// Creates a cache holding at most `max_capacity` entries.
    pub fn new(max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .eviction_policy(EvictionPolicy::lru())
            .build();

        debug!(max_capacity, "Using Moka resolution cache");

        Self {
            cache,
            max_capacity,
        }
    }

    pub fn max_capacity(&self) -> u64 {
        self.max_capacity
    }

    /// Applies pending evictions so that [`LinkCache::entry_count`] is exact.
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }
}

impl Default for MokaLinkCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

#[async_trait]
impl LinkCache for MokaLinkCache {
    async fn get(&self, short_token: &str) -> Option<CachedLink> {
        let hit = self.cache.get(short_token).await;
        match &hit {
            Some(_) => {
                trace!(token = short_token, "Cache HIT");
                metrics::counter!("shortlinks_cache_hits_total").increment(1);
            }
            None => {
                trace!(token = short_token, "Cache MISS");
                metrics::counter!("shortlinks_cache_misses_total").increment(1);
            }
        }
        hit
    }

    async fn put(&self, short_token: &str, link: CachedLink) {
        trace!(token = short_token, link_id = link.id, "Cache PUT");
        self.cache.insert(short_token.to_string(), link).await;
    }

    fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    fn backend(&self) -> &'static str {
        "moka"
    }
}
