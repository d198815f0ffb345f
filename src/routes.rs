//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /?link=<url>`   - Shorten a URL
//! - `GET /mylinks`       - Caller's links
//! - `GET /stats/{token}` - Caller's link statistics
//! - `GET /health`        - Health check: store, visit queue, cache
//! - `GET /{token}`       - Short link redirect
//!
//! Static segments take precedence over `/{token}`, and generated tokens never
//! collide with them.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .merge(api::routes::owner_routes())
        .route("/health", get(health_handler))
        .route("/{token}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
