//! # Core Library
//!
//! Configuration, error type, DTOs, models, and database access for the
//! record shop backend.

pub mod config;
pub mod error;
pub mod model;
pub mod dto;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
pub use model::store::{DbPool, create_pool, run_migrations};
