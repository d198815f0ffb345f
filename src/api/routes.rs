//! Owner-facing route configuration.
//!
//! Ownership on these routes comes from the owner cookie, which is not
//! authenticated.

use crate::api::handlers::{my_links_handler, shorten_handler, stats_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Routes operating on the caller's links.
///
/// # Endpoints
///
/// - `GET /?link=<url>`      - Shorten a URL (issues an owner cookie if absent)
/// - `GET /mylinks`          - List the caller's links with visit totals
/// - `GET /stats/{token}`    - Visit statistics for one of the caller's links
pub fn owner_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(shorten_handler))
        .route("/mylinks", get(my_links_handler))
        .route("/stats/{token}", get(stats_handler))
}
