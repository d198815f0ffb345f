//! Resolution cache for fast redirect lookups.
//!
//! Provides a [`LinkCache`] trait with two implementations:
//! - [`MokaLinkCache`] - Bounded LRU in-memory cache
//! - [`NullCache`] - No-op implementation for disabled caching

mod moka_cache;
mod null_cache;
mod service;

pub use moka_cache::{DEFAULT_CACHE_CAPACITY, MokaLinkCache};
pub use null_cache::NullCache;
pub use service::LinkCache;

#[cfg(test)]
pub use service::MockLinkCache;
