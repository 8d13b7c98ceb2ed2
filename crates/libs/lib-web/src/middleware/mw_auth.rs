//! # Authentication Middleware
//!
//! Gates routes behind a bearer token.
//!
//! The middleware reads `Authorization: Bearer <token>`, verifies the token
//! with the shared [`TokenCodec`], and inserts a [`CurrentUser`] into the
//! request extensions. Any failure short-circuits with
//! [`AppError::Unauthenticated`] (401) and the wrapped handler never runs.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use axum::{middleware, routing::get, Router};
//! use lib_web::middleware::{require_auth, CurrentUser};
//!
//! async fn whoami(user: CurrentUser) -> String {
//!     format!("Hello, user {}!", user.user_id)
//! }
//!
//! let api = Router::new()
//!     .route("/whoami", get(whoami))
//!     .layer(middleware::from_fn_with_state(tokens, require_auth));
//! ```

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use lib_auth::TokenCodec;
use lib_core::AppError;
use tracing::{debug, warn};

/// Identity attached to a request by [`require_auth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: i64,
}

/// Authentication middleware that validates bearer tokens.
///
/// - **Valid token**: continues with `CurrentUser` in extensions
/// - **Missing header, wrong scheme, or failed verification**: `401 Unauthorized`
pub async fn require_auth(
    State(tokens): State<Arc<TokenCodec>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer(req.headers())?;

    let user_id = tokens.verify(token).map_err(|e| {
        warn!("[AUTH] Token rejected: {}", e);
        AppError::Unauthenticated
    })?;

    debug!("[AUTH] Authenticated user id: {}", user_id);
    req.extensions_mut().insert(CurrentUser { user_id });

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, AppError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            warn!("[AUTH] Missing Authorization header");
            AppError::Unauthenticated
        })?;

    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            warn!("[AUTH] Invalid Authorization header format");
            AppError::Unauthenticated
        })?;

    Ok(token)
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .copied()
            .ok_or(AppError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{body_json, test_codec};
    use axum::{body::Body, http::StatusCode, middleware, routing::get, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    fn gated_app(tokens: Arc<TokenCodec>, hits: Arc<AtomicUsize>) -> Router {
        Router::new()
            .route(
                "/whoami",
                get(move |user: CurrentUser| {
                    let hits = hits.clone();
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        user.user_id.to_string()
                    }
                }),
            )
            .route_layer(middleware::from_fn_with_state(tokens, require_auth))
    }

    async fn call(app: Router, authorization: Option<&str>) -> Response {
        let mut builder = axum::http::Request::builder().uri("/whoami");
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap()
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler() {
        let tokens = Arc::new(test_codec());
        let hits = Arc::new(AtomicUsize::new(0));
        let token = tokens.issue(42).unwrap();

        let response = call(gated_app(tokens, hits.clone()), Some(&format!("Bearer {token}"))).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"42");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rejections_never_reach_handler() {
        let tokens = Arc::new(test_codec());
        let other = TokenCodec::new("some-other-secret-that-is-32-chars-long", 24);
        let foreign = format!("Bearer {}", other.issue(42).unwrap());
        let raw = tokens.issue(42).unwrap();
        let hits = Arc::new(AtomicUsize::new(0));

        let cases = [
            None,
            Some("Bearer garbage"),
            Some("Bearer "),
            Some(raw.as_str()),
            Some("Basic dXNlcjpwYXNz"),
            Some(foreign.as_str()),
        ];

        for authorization in cases {
            let response = call(gated_app(tokens.clone(), hits.clone()), authorization).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "case {authorization:?}");

            let body = body_json(response).await;
            assert_eq!(body["code"], "Unauthenticated");
        }

        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_extractor_without_gate_is_unauthenticated() {
        let app = Router::new().route("/whoami", get(|user: CurrentUser| async move { user.user_id.to_string() }));

        let response = app
            .oneshot(axum::http::Request::builder().uri("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
