//! Repository trait for the authoritative link store.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for short links.
///
/// The store owns two uniqueness constraints: the short token is globally
/// unique, and (long URL, owner) is unique. Implementations report violations
/// as [`AppError::DuplicateToken`] and [`AppError::DuplicateLink`] so the
/// creation path can retry or re-read without application-level locking.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Persists a new link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the long URL, token or owner is empty.
    /// Returns [`AppError::DuplicateToken`] if the short token already exists.
    /// Returns [`AppError::DuplicateLink`] if the owner already has a link for the URL.
    /// Returns [`AppError::Unavailable`] if the store cannot be reached.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Exact-match lookup by short token. Used on the redirect hot path.
    async fn find_by_short_token(&self, short_token: &str) -> Result<Option<Link>, AppError>;

    /// Looks up the link an owner created for a long URL.
    async fn find_by_long_url_and_owner(
        &self,
        long_url: &str,
        owner: &str,
    ) -> Result<Option<Link>, AppError>;

    /// Lists an owner's links in creation order.
    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Link>, AppError>;

    /// Counts all links.
    async fn count(&self) -> Result<i64, AppError>;
}
