//! Link creation and lookup service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::token_generator::{DEFAULT_TOKEN_LENGTH, generate_token, is_reserved};
use crate::utils::url_normalizer::normalize_long_url;

/// Default number of token generation attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Service for creating and retrieving short links.
///
/// Creation is idempotent per (long URL, owner): the same pair always yields
/// the same persisted link. Uniqueness is enforced by the store, so concurrent
/// requests need no locking here.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    token_length: usize,
    max_attempts: usize,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a link service with the default token length and attempt limit.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self::with_settings(link_repository, DEFAULT_TOKEN_LENGTH, DEFAULT_MAX_ATTEMPTS)
    }

    pub fn with_settings(link_repository: Arc<L>, token_length: usize, max_attempts: usize) -> Self {
        Self {
            link_repository,
            token_length,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Returns the owner's existing link for `long_url`, or creates one.
    ///
    /// The long URL is normalized first (trimmed, `http://` prepended when no
    /// HTTP(S) scheme is present).
    ///
    /// # Collisions
    ///
    /// A freshly generated token may already be taken. Each
    /// [`AppError::DuplicateToken`] consumes one attempt; reserved tokens are
    /// skipped without touching the store. If another request created the same
    /// (long URL, owner) pair in the meantime, the winner's link is returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty owner or an invalid URL.
    /// Returns [`AppError::TokenSpaceExhausted`] when every attempt collided.
    /// Returns [`AppError::Unavailable`] if the store cannot be reached.
    pub async fn create_or_get(&self, long_url: &str, owner: &str) -> Result<Link, AppError> {
        if owner.trim().is_empty() {
            return Err(AppError::bad_request(
                "Owner token must not be empty",
                json!({ "field": "owner" }),
            ));
        }

        let normalized_url = normalize_long_url(long_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        if let Some(existing) = self
            .link_repository
            .find_by_long_url_and_owner(&normalized_url, owner)
            .await?
        {
            debug!(token = %existing.short_token, owner, "Returning existing link");
            return Ok(existing);
        }

        for attempt in 1..=self.max_attempts {
            let short_token = generate_token(self.token_length);
            if is_reserved(&short_token) {
                debug!(token = %short_token, attempt, "Generated reserved token, regenerating");
                continue;
            }

            let new_link = NewLink {
                long_url: normalized_url.clone(),
                short_token,
                owner: owner.to_string(),
            };

            match self.link_repository.create(new_link).await {
                Ok(link) => {
                    info!(token = %link.short_token, link_id = link.id, owner, "Link created");
                    return Ok(link);
                }
                Err(AppError::DuplicateToken { token }) => {
                    warn!(token = %token, attempt, "Short token collision, retrying");
                }
                Err(AppError::DuplicateLink) => {
                    return self
                        .link_repository
                        .find_by_long_url_and_owner(&normalized_url, owner)
                        .await?
                        .ok_or_else(|| {
                            AppError::internal(
                                "Link vanished after a uniqueness conflict",
                                json!({ "long_url": normalized_url }),
                            )
                        });
                }
                Err(e) => return Err(e),
            }
        }

        warn!(attempts = self.max_attempts, owner, "Token space exhausted");
        Err(AppError::TokenSpaceExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Counts all links. Doubles as a store connectivity check.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.link_repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Utc;

    fn link_from(id: i64, new_link: &NewLink) -> Link {
        Link::new(
            id,
            new_link.long_url.clone(),
            new_link.short_token.clone(),
            new_link.owner.clone(),
            Utc::now(),
        )
    }

    fn existing_link(id: i64, url: &str, token: &str, owner: &str) -> Link {
        Link::new(
            id,
            url.to_string(),
            token.to_string(),
            owner.to_string(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_create_or_get_creates_new_link() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_long_url_and_owner()
            .withf(|url, owner| url == "http://example.com/page" && owner == "ownerA")
            .times(1)
            .returning(|_, _| Ok(None));

        mock_repo
            .expect_create()
            .withf(|new_link| {
                new_link.short_token.len() == 8
                    && new_link.short_token.chars().all(|c| c.is_ascii_alphanumeric())
            })
            .times(1)
            .returning(|new_link| Ok(link_from(1, &new_link)));

        let service = LinkService::new(Arc::new(mock_repo));

        let link = service
            .create_or_get("example.com/page", "ownerA")
            .await
            .unwrap();

        assert_eq!(link.long_url, "http://example.com/page");
        assert_eq!(link.owner, "ownerA");
    }

    #[tokio::test]
    async fn test_create_or_get_returns_existing_link() {
        let mut mock_repo = MockLinkRepository::new();

        let existing = existing_link(5, "https://example.com", "exist123", "ownerA");
        mock_repo
            .expect_find_by_long_url_and_owner()
            .times(1)
            .returning(move |_, _| Ok(Some(existing.clone())));
        mock_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        let link = service
            .create_or_get("  https://example.com  ", "ownerA")
            .await
            .unwrap();

        assert_eq!(link.id, 5);
        assert_eq!(link.short_token, "exist123");
    }

    #[tokio::test]
    async fn test_create_or_get_uses_configured_token_length() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_long_url_and_owner()
            .returning(|_, _| Ok(None));
        mock_repo
            .expect_create()
            .withf(|new_link| new_link.short_token.len() == 12)
            .times(1)
            .returning(|new_link| Ok(link_from(1, &new_link)));

        let service = LinkService::with_settings(Arc::new(mock_repo), 12, 5);

        let link = service.create_or_get("example.com", "ownerA").await.unwrap();
        assert_eq!(link.short_token.len(), 12);
    }

    #[tokio::test]
    async fn test_create_or_get_retries_on_token_collision() {
        let mut mock_repo = MockLinkRepository::new();
        let mut seq = mockall::Sequence::new();

        mock_repo
            .expect_find_by_long_url_and_owner()
            .returning(|_, _| Ok(None));
        mock_repo
            .expect_create()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|new_link| {
                Err(AppError::DuplicateToken {
                    token: new_link.short_token,
                })
            });
        mock_repo
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new_link| Ok(link_from(3, &new_link)));

        let service = LinkService::new(Arc::new(mock_repo));

        let link = service.create_or_get("example.com", "ownerA").await.unwrap();
        assert_eq!(link.id, 3);
    }

    #[tokio::test]
    async fn test_create_or_get_token_space_exhausted() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_long_url_and_owner()
            .returning(|_, _| Ok(None));
        mock_repo.expect_create().returning(|new_link| {
            Err(AppError::DuplicateToken {
                token: new_link.short_token,
            })
        });

        let service = LinkService::with_settings(Arc::new(mock_repo), 8, 3);

        let result = service.create_or_get("example.com", "ownerA").await;

        assert!(matches!(
            result,
            Err(AppError::TokenSpaceExhausted { attempts: 3 })
        ));
    }

    #[tokio::test]
    async fn test_create_or_get_refetches_after_duplicate_link() {
        let mut mock_repo = MockLinkRepository::new();
        let mut seq = mockall::Sequence::new();

        mock_repo
            .expect_find_by_long_url_and_owner()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(None));
        mock_repo
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::DuplicateLink));

        let winner = existing_link(9, "http://example.com", "winner12", "ownerA");
        mock_repo
            .expect_find_by_long_url_and_owner()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_, _| Ok(Some(winner.clone())));

        let service = LinkService::new(Arc::new(mock_repo));

        let link = service.create_or_get("example.com", "ownerA").await.unwrap();
        assert_eq!(link.short_token, "winner12");
    }

    #[tokio::test]
    async fn test_create_or_get_rejects_empty_input() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_find_by_long_url_and_owner().times(0);
        mock_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.create_or_get("   ", "ownerA").await;
        assert!(matches!(result, Err(AppError::Validation { .. })));

        let result = service.create_or_get("example.com", "").await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_or_get_propagates_unavailable() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_long_url_and_owner()
            .returning(|_, _| Err(AppError::unavailable("pool timed out")));
        mock_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.create_or_get("example.com", "ownerA").await;
        assert!(matches!(result, Err(AppError::Unavailable { .. })));
    }
}
