//! # Authentication Handlers
//!
//! HTTP request handlers for user authentication endpoints.
//!
//! ## Overview
//!
//! - `POST /auth/signup` registers a user and returns `201 { "token": ... }`
//! - `POST /auth/signin` checks credentials and returns `200 { "token": ... }`
//!
//! Both delegate to [`AuthService`]. Signin failures of any kind render as
//! the same `401 InvalidCredentials` body.
//!
//! ## Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::post};
//! use lib_web::handlers::auth::{signin, signup};
//!
//! let app = Router::new()
//!     .route("/auth/signup", post(signup))
//!     .route("/auth/signin", post(signin))
//!     .with_state(state);
//! ```

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use lib_core::dto::{AuthResponse, SigninRequest, SignupRequest};
use lib_core::{AppError, Result};
use tracing::{debug, info, instrument, warn};

use super::ApiJson;
use crate::services::AuthService;

/// Signup handler - creates a new user account.
///
/// # Returns
///
/// * `201 Created` with a token for the new user
/// * `400` for a malformed email or empty password
/// * `409` when the email is already registered
#[instrument(skip(auth, req))]
pub async fn signup(
    State(auth): State<Arc<AuthService>>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    info!("[SIGNUP] NEW USER SIGNUP REQUEST");
    debug!("   Email: {}", req.email);

    let outcome = auth.signup(&req.email, &req.password).await?;

    info!(user_id = outcome.user_id, "[SIGNUP] User created and authenticated");
    Ok((StatusCode::CREATED, Json(AuthResponse { token: outcome.token })))
}

/// Signin handler - authenticates an existing user.
///
/// Any failure other than a store outage, including an empty body,
/// is reported as `401 InvalidCredentials`.
#[instrument(skip(auth, req))]
pub async fn signin(
    State(auth): State<Arc<AuthService>>,
    ApiJson(req): ApiJson<SigninRequest>,
) -> Result<Json<AuthResponse>> {
    info!("[SIGNIN] SIGNIN ATTEMPT");
    debug!("   Email: {}", req.email);

    if req.email.is_empty() || req.password.is_empty() {
        warn!("[SIGNIN] Missing email or password");
        return Err(AppError::InvalidCredentials);
    }

    let outcome = auth.signin(&req.email, &req.password).await?;

    info!(user_id = outcome.user_id, "[SIGNIN] User authenticated successfully");
    Ok(Json(AuthResponse { token: outcome.token }))
}

#[cfg(test)]
mod tests;
