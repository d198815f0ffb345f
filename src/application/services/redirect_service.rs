//! Short token resolution on the redirect path.

use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::CachedLink;
use crate::domain::repositories::LinkRepository;
use crate::domain::visit_event::{VisitEvent, VisitSender};
use crate::error::AppError;
use crate::infrastructure::cache::LinkCache;
use crate::utils::token_generator::is_well_formed;

/// Resolves short tokens through the cache, falling back to the store.
///
/// Every successful resolution enqueues a visit. The enqueue never blocks and
/// its outcome never changes the result.
pub struct RedirectService<L, C>
where
    L: LinkRepository + ?Sized,
    C: LinkCache + ?Sized,
{
    link_repository: Arc<L>,
    cache: Arc<C>,
    visits: VisitSender,
}

impl<L, C> RedirectService<L, C>
where
    L: LinkRepository + ?Sized,
    C: LinkCache + ?Sized,
{
    pub fn new(link_repository: Arc<L>, cache: Arc<C>, visits: VisitSender) -> Self {
        Self {
            link_repository,
            cache,
            visits,
        }
    }

    /// Resolves a short token to its link.
    ///
    /// Misses are not cached: an unknown token queries the store every time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::LinkNotFound`] if no link has this token.
    /// Returns [`AppError::Unavailable`] if the store cannot be reached on a
    /// cache miss.
    pub async fn resolve(&self, short_token: &str) -> Result<CachedLink, AppError> {
        if !is_well_formed(short_token) {
            return Err(AppError::LinkNotFound {
                token: short_token.to_string(),
            });
        }

        let link = match self.cache.get(short_token).await {
            Some(cached) => {
                debug!(token = short_token, "Cache hit");
                cached
            }
            None => {
                let Some(link) = self.link_repository.find_by_short_token(short_token).await?
                else {
                    debug!(token = short_token, "Unknown short token");
                    return Err(AppError::LinkNotFound {
                        token: short_token.to_string(),
                    });
                };

                let cached = CachedLink::from(link);
                self.cache.put(short_token, cached.clone()).await;
                cached
            }
        };

        self.visits
            .dispatch(VisitEvent::new(link.id, link.short_token.clone()));

        Ok(link)
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }
}
