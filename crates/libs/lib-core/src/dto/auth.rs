//! # Authentication Data Transfer Objects
//!
//! Defines request and response structures for authentication endpoints.
//!
//! ## Endpoints Using These DTOs
//!
//! - `POST /auth/signup` - [`SignupRequest`] -> [`AuthResponse`]
//! - `POST /auth/signin` - [`SigninRequest`] -> [`AuthResponse`]
//! - `GET /api/me` - [`MeResponse`]
//! - `GET /api/test` - [`MessageResponse`]
//!
//! ## Wire Format
//!
//! ```text
//! POST /auth/signin
//! Content-Type: application/json
//!
//! { "email": "a@x.com", "password": "pw123" }
//! ```
//!
//! Response:
//! ```text
//! { "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..." }
//! ```
//!
//! Missing fields deserialize as empty strings so that validation, not the
//! JSON extractor, decides the error.

use serde::{Deserialize, Serialize};

/// Signup request for new user registration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Signin request for an existing user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SigninRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Authentication response returned on successful signin or signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

/// Identity of the caller on a gated route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub user_id: i64,
}

/// Plain message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Standard error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}
