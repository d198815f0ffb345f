//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::link_service::DEFAULT_MAX_ATTEMPTS;
use crate::application::services::{LinkService, RedirectService, StatsService};
use crate::domain::repositories::{LinkRepository, VisitRepository};
use crate::domain::visit_event::VisitSender;
use crate::infrastructure::cache::LinkCache;
use crate::utils::owner_cookie::DEFAULT_OWNER_COOKIE;
use crate::utils::token_generator::DEFAULT_TOKEN_LENGTH;

/// Services are built over trait objects so the store backend is chosen at
/// startup.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub redirect_service: Arc<RedirectService<dyn LinkRepository, dyn LinkCache>>,
    pub stats_service: Arc<StatsService<dyn LinkRepository, dyn VisitRepository>>,
    pub visit_sender: VisitSender,
    pub owner_cookie: Arc<str>,
    pub store_backend: &'static str,
}

/// Tunables applied when building [`AppState`].
#[derive(Debug, Clone)]
pub struct StateSettings {
    pub token_length: usize,
    pub token_max_attempts: usize,
    pub owner_cookie: String,
    pub store_backend: &'static str,
}

impl Default for StateSettings {
    fn default() -> Self {
        Self {
            token_length: DEFAULT_TOKEN_LENGTH,
            token_max_attempts: DEFAULT_MAX_ATTEMPTS,
            owner_cookie: DEFAULT_OWNER_COOKIE.to_string(),
            store_backend: "memory",
        }
    }
}

impl AppState {
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        visit_repository: Arc<dyn VisitRepository>,
        cache: Arc<dyn LinkCache>,
        visit_sender: VisitSender,
        settings: StateSettings,
    ) -> Self {
        let link_service = Arc::new(LinkService::with_settings(
            Arc::clone(&link_repository),
            settings.token_length,
            settings.token_max_attempts,
        ));
        let redirect_service = Arc::new(RedirectService::new(
            Arc::clone(&link_repository),
            cache,
            visit_sender.clone(),
        ));
        let stats_service = Arc::new(StatsService::new(link_repository, visit_repository));

        Self {
            link_service,
            redirect_service,
            stats_service,
            visit_sender,
            owner_cookie: settings.owner_cookie.into(),
            store_backend: settings.store_backend,
        }
    }
}
