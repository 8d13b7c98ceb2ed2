//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! The loaded [`Config`] is an immutable value. It is built once in `main`
//! and handed to whatever needs it (the token codec, the pool); nothing
//! reads it back from a global.
//!
//! ```rust,no_run
//! use lib_core::Config;
//!
//! let config = Config::load()?;
//! println!("database: {}", config.database_url);
//! # Ok::<(), lib_core::AppError>(())
//! ```

use lib_utils::{get_env, get_env_or, get_env_parse_or};

use crate::error::{AppError, Result};

/// Default SQLite database location.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:data/records.db";

/// Default token validity period.
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Minimum accepted length of the signing secret.
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Secret key for token signing and verification
    ///
    /// **Must be at least 32 characters long.**
    pub jwt_secret: String,

    /// Token validity period in hours
    ///
    /// Valid range: 1-720 hours (1 hour to 30 days)
    pub jwt_expiration_hours: i64,
}

impl Config {
    /// Load `.env` (if present), read the environment, and validate.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let database_url = get_env_or("DATABASE_URL", DEFAULT_DATABASE_URL);

        let jwt_secret = get_env("JWT_SECRET").map_err(|e| AppError::Config(e.to_string()))?;

        let jwt_expiration_hours =
            get_env_parse_or("JWT_EXPIRATION_HOURS", DEFAULT_JWT_EXPIRATION_HOURS)
                .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration_hours,
        })
    }

    /// Validate configuration values against security rules.
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(AppError::Config(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LEN
            )));
        }

        if !(1..=720).contains(&self.jwt_expiration_hours) {
            return Err(AppError::Config(
                "JWT_EXPIRATION_HOURS must be between 1 and 720 (30 days)".to_string(),
            ));
        }

        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"***REDACTED***")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .finish()
    }
}
