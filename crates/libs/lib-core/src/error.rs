//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used consistently
//! across all backend modules. It follows the `thiserror` pattern and maps each
//! variant onto an HTTP status.
//!
//! ## Error Categories
//!
//! 1. **Client Errors** (4xx)
//!    - [`InvalidInput`](AppError::InvalidInput) → 400 Bad Request
//!    - [`InvalidCredentials`](AppError::InvalidCredentials), the token variants and
//!      [`Unauthenticated`](AppError::Unauthenticated) → 401 Unauthorized
//!    - [`NotFound`](AppError::NotFound) → 404 Not Found
//!    - [`DuplicateEmail`](AppError::DuplicateEmail) / [`Conflict`](AppError::Conflict) → 409 Conflict
//!
//! 2. **Server Errors** (5xx)
//!    - [`StoreUnavailable`](AppError::StoreUnavailable) → 500, detail only in logs
//!    - [`Config`](AppError::Config) / [`Internal`](AppError::Internal) → 500
//!
//! ## Response Body
//!
//! Every error renders as `{ "error": <message>, "code": <variant> }`.
//! Server-side errors never expose their detail in `error`.
//!
//! ## Error Conversion
//!
//! - `From<lib_auth::Error>` - hasher and token codec failures
//! - `From<sqlx::Error>` - database errors
//! - `From<anyhow::Error>` - catch-all internal failures
//! - `From<JsonRejection>` / `From<PathRejection>` - unparseable bodies and ids become `InvalidInput`

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::dto::ErrorResponse;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type covering all error scenarios.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing or malformed request input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Signup for an email that is already registered.
    #[error("Email already registered")]
    DuplicateEmail,

    /// A uniqueness or reference constraint other than the user email.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Signin failed. Deliberately does not say whether the email or the password was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Token is structurally malformed.
    #[error("Invalid token")]
    InvalidToken,

    /// Token signature does not match.
    #[error("Token signature mismatch")]
    TokenTampered,

    /// Token is past its expiry.
    #[error("Token expired")]
    TokenExpired,

    /// Request reached a gated route without a valid bearer token.
    #[error("Unauthenticated")]
    Unauthenticated,

    /// Requested resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database connection or query failure.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Internal server error (unexpected failures).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials
            | AppError::InvalidToken
            | AppError::TokenTampered
            | AppError::TokenExpired
            | AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateEmail | AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::StoreUnavailable(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get a user-friendly error message.
    ///
    /// For server-side errors, returns a generic message to avoid exposing implementation details.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) | AppError::NotFound(msg) | AppError::Conflict(msg) => {
                msg.clone()
            }
            AppError::StoreUnavailable(_) | AppError::Config(_) | AppError::Internal(_) => {
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Variant name, rendered as the `code` field of the response body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "Config",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::DuplicateEmail => "DuplicateEmail",
            AppError::Conflict(_) => "Conflict",
            AppError::InvalidCredentials => "InvalidCredentials",
            AppError::InvalidToken => "InvalidToken",
            AppError::TokenTampered => "TokenTampered",
            AppError::TokenExpired => "TokenExpired",
            AppError::Unauthenticated => "Unauthenticated",
            AppError::NotFound(_) => "NotFound",
            AppError::StoreUnavailable(_) => "StoreUnavailable",
            AppError::Internal(_) => "Internal",
        }
    }
}

/// Implement Axum's `IntoResponse` for automatic error handling.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Server error: {}", self);
        } else {
            tracing::debug!("Client error: {}", self);
        }

        let body = Json(ErrorResponse {
            error: self.user_message(),
            code: Some(self.code().to_string()),
        });

        (status, body).into_response()
    }
}

/// Convert hasher and token codec failures.
impl From<lib_auth::Error> for AppError {
    fn from(err: lib_auth::Error) -> Self {
        match err {
            lib_auth::Error::InvalidInput(msg) => AppError::InvalidInput(msg),
            lib_auth::Error::InvalidToken => AppError::InvalidToken,
            lib_auth::Error::TokenTampered => AppError::TokenTampered,
            lib_auth::Error::TokenExpired => AppError::TokenExpired,
            lib_auth::Error::Signing(msg) => AppError::Internal(msg),
        }
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert `sqlx::Error` to `AppError`.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Database record not found".to_string()),
            sqlx::Error::Database(db_err) => {
                AppError::StoreUnavailable(format!("Database error: {}", db_err.message()))
            }
            _ => AppError::StoreUnavailable(format!("Database error: {}", err)),
        }
    }
}

/// Malformed or non-JSON request bodies.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

/// Path segments that do not parse, such as a non-numeric id.
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

/// Whether `err` is a unique-constraint violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

/// Whether `err` is a foreign-key violation.
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}
