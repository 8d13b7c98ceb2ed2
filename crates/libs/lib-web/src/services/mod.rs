//! # Services Layer
//!
//! Business logic that orchestrates the data layer and the auth primitives,
//! kept apart from HTTP concerns:
//!
//! ```text
//! Handlers (HTTP) → Services (Business Logic) → Repository / lib-auth
//! ```
//!
//! Services are structs that hold their dependencies (`DbPool`,
//! `Arc<TokenCodec>`) and return `Result<T, AppError>`.

pub mod auth;

pub use auth::{AuthOutcome, AuthService};
