//! Error taxonomy shared by the store, the core services and the HTTP layer.
//!
//! Every variant maps to exactly one HTTP status and a stable machine-readable
//! `code`, rendered as:
//!
//! ```json
//! { "error": { "code": "invalid_link", "message": "invalid link", "details": {} } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Empty or malformed input. Rejected before any side effect.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// The generated short token is already taken. Retried by link creation.
    #[error("short token '{token}' is already taken")]
    DuplicateToken { token: String },

    /// A link for the same (long URL, owner) pair was created concurrently.
    /// Resolved by re-reading the winner's record.
    #[error("a link for this URL already exists for the owner")]
    DuplicateLink,

    /// Token generation kept colliding. Safe to retry the whole request later.
    #[error("could not allocate a free short token after {attempts} attempts")]
    TokenSpaceExhausted { attempts: usize },

    #[error("invalid link")]
    LinkNotFound { token: String },

    /// Reported identically whether the link is missing or owned by someone else.
    #[error("link not found")]
    NotFoundOrNotOwner,

    /// The store is unreachable or timed out.
    #[error("{message}")]
    Unavailable { message: String },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Returns true for failures that may succeed if the same call is repeated.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Unavailable { .. } | Self::TokenSpaceExhausted { .. }
        )
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_error"),
            Self::DuplicateToken { .. } | Self::DuplicateLink => (StatusCode::CONFLICT, "conflict"),
            Self::TokenSpaceExhausted { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, "token_space_exhausted")
            }
            Self::LinkNotFound { .. } => (StatusCode::NOT_FOUND, "invalid_link"),
            Self::NotFoundOrNotOwner => (StatusCode::NOT_FOUND, "not_found"),
            Self::Unavailable { .. } => (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable"),
            Self::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    /// Converts the error into its serializable form without consuming it.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code) = self.status_and_code();
        let details = match self {
            Self::Validation { details, .. } | Self::Internal { details, .. } => details.clone(),
            Self::LinkNotFound { token } => json!({ "token": token }),
            Self::TokenSpaceExhausted { attempts } => json!({ "attempts": attempts }),
            _ => json!({}),
        };

        ErrorInfo {
            code,
            message: self.to_string(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, _) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        crate::utils::db_error::map_sqlx_error(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&e).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Invalid request parameters", details)
    }
}
