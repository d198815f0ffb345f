//! Resolution cache trait.

use async_trait::async_trait;

use crate::domain::entities::CachedLink;

/// Process-local cache in front of the link store, keyed by short token.
///
/// Only links that exist in the store may be inserted: `put` takes a
/// [`CachedLink`], so misses cannot be cached. Links are immutable, so an
/// entry never needs invalidation; concurrent `put`s for the same token
/// carry the same link and are idempotent.
///
/// Cache operations are infallible. A backend that can fail must degrade to
/// a miss.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::MokaLinkCache`] - Bounded LRU cache
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkCache: Send + Sync {
    /// Returns the cached link for a token, or `None` on miss.
    async fn get(&self, short_token: &str) -> Option<CachedLink>;

    /// Inserts or overwrites the entry for a token.
    async fn put(&self, short_token: &str, link: CachedLink);

    /// Approximate number of cached entries.
    fn entry_count(&self) -> u64;

    /// Short backend name for health output.
    fn backend(&self) -> &'static str;
}
