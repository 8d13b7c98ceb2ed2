//! # Gated Identity Handlers
//!
//! Minimal routes behind [`require_auth`](crate::middleware::require_auth),
//! useful to check that a token is accepted.

use axum::Json;
use lib_core::dto::{MeResponse, MessageResponse};
use tracing::debug;

use crate::middleware::CurrentUser;

/// `GET /api/test`
pub async fn test(user: CurrentUser) -> Json<MessageResponse> {
    debug!(user_id = user.user_id, "[PROTECTED] test route");
    Json(MessageResponse {
        message: format!("Authenticated as user {}", user.user_id),
    })
}

/// `GET /api/me`
pub async fn me(user: CurrentUser) -> Json<MeResponse> {
    Json(MeResponse {
        user_id: user.user_id,
    })
}
