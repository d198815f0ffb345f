//! Translation of `sqlx` failures into [`AppError`].
//!
//! Constraint names match the ones declared in `migrations/`.

use crate::error::AppError;
use serde_json::json;

pub const SHORT_TOKEN_CONSTRAINT: &str = "links_short_token_key";
pub const LONG_URL_OWNER_CONSTRAINT: &str = "links_long_url_owner_key";
pub const VISIT_LINK_CONSTRAINT: &str = "visits_link_id_fkey";

/// PostgreSQL `query_canceled`, raised when `statement_timeout` fires.
const QUERY_CANCELED: &str = "57014";

/// Maps a database error onto the application error taxonomy.
///
/// - unique violation on the short token → [`AppError::DuplicateToken`]
/// - unique violation on (long URL, owner) → [`AppError::DuplicateLink`]
/// - foreign key violation on visits → [`AppError::Validation`]
/// - pool timeouts, I/O failures and statement timeouts → [`AppError::Unavailable`]
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db) => {
            if db.is_unique_violation() {
                return match db.constraint() {
                    Some(SHORT_TOKEN_CONSTRAINT) => AppError::DuplicateToken {
                        token: String::new(),
                    },
                    Some(LONG_URL_OWNER_CONSTRAINT) => AppError::DuplicateLink,
                    other => AppError::internal(
                        "Unique constraint violation",
                        json!({ "constraint": other }),
                    ),
                };
            }

            if db.is_foreign_key_violation() {
                return AppError::bad_request(
                    "Referenced link does not exist",
                    json!({ "constraint": db.constraint().unwrap_or(VISIT_LINK_CONSTRAINT) }),
                );
            }

            if db.code().as_deref() == Some(QUERY_CANCELED) {
                return AppError::unavailable("Database statement timed out");
            }

            tracing::error!(error = %e, "database error");
            AppError::internal("Database error", json!({}))
        }
        sqlx::Error::PoolTimedOut => AppError::unavailable("Timed out waiting for a database connection"),
        sqlx::Error::PoolClosed => AppError::unavailable("Database pool is closed"),
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
            tracing::warn!(error = %e, "database connection failure");
            AppError::unavailable("Database is unreachable")
        }
        _ => {
            tracing::error!(error = %e, "database error");
            AppError::internal("Database error", json!({}))
        }
    }
}
