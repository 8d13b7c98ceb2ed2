//! # Auth Handler Tests
//!
//! Test suite for the signup and signin handlers, driven through the full router.


use crate::test_utils::{body_json, json_request, signup_token, test_app};
use axum::http::{Method, Request, StatusCode};
use axum::{body::Body, Router};
use serde_json::{json, Value};
use tower::ServiceExt;

/// POST `body` to `uri` and return the status and JSON body.
async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(json_request(Method::POST, uri, None, body))
        .await
        .unwrap();
    let status = response.status();
    (status, body_json(response).await)
}

fn credentials(email: &str, password: &str) -> Value {
    json!({ "email": email, "password": password })
}
