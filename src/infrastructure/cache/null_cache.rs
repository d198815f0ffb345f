//! No-op cache implementation for disabled caching.

use async_trait::async_trait;
use tracing::debug;

use super::service::LinkCache;
use crate::domain::entities::CachedLink;

/// A cache that stores nothing; every lookup is a miss.
///
/// Selected with `CACHE_CAPACITY=0`. Every resolution then reads the store.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkCache for NullCache {
    async fn get(&self, _short_token: &str) -> Option<CachedLink> {
        None
    }

    async fn put(&self, _short_token: &str, _link: CachedLink) {}

    fn entry_count(&self) -> u64 {
        0
    }

    fn backend(&self) -> &'static str {
        "disabled"
    }
}
