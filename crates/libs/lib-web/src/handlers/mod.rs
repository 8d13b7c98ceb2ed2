//! # HTTP Request Handlers
//!
//! Axum handlers organized by feature domain. Business logic lives in
//! [`crate::services`] and the repositories of `lib_core`.
//!
//! ## Handler Modules
//!
//! - **[`auth`]**: `POST /auth/signup`, `POST /auth/signin`
//! - **[`protected`]**: `GET /api/test`, `GET /api/me`
//! - **[`records`]**: public reads under `/records`, writes under `/api/records`
//! - **[`categories`]**: public reads under `/categories`, writes under `/api/categories`
//!
//! ## Error Handling
//!
//! Handlers return `lib_core::Result<T>`. Every [`AppError`] renders as
//! `{ "error": ..., "code": ... }` with its mapped status, and bodies are
//! read through [`ApiJson`] and [`ApiPath`] so that malformed JSON and
//! non-numeric ids take the same shape.

use axum::extract::{FromRequest, FromRequestParts};
use lib_core::AppError;

pub mod auth;
pub mod categories;
pub mod protected;
pub mod records;

/// JSON body extractor whose rejection is an [`AppError::InvalidInput`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path extractor whose rejection is an [`AppError::InvalidInput`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);
