//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short token to its long URL.
///
/// # Endpoint
///
/// `GET /{token}`
///
/// # Request Flow
///
/// 1. Look the token up in the resolution cache
/// 2. On miss, query the store and cache the result
/// 3. Enqueue a visit for the background worker (never blocks)
/// 4. Return 307 Temporary Redirect
///
/// # Errors
///
/// Returns 404 Not Found with code `invalid_link` for unknown tokens.
/// Returns 503 Service Unavailable if the store cannot be reached on a miss.
pub async fn redirect_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.redirect_service.resolve(&token).await?;

    Ok(Redirect::temporary(&link.long_url))
}
