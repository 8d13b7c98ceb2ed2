//! # Auth Service
//!
//! Signup and signin: password hashing, credential persistence, token issuance.
//!
//! ```text
//! signup: validate → hash (blocking pool) → INSERT ... RETURNING → issue token
//! signin: lookup by email → verify (blocking pool) → issue token
//! ```
//!
//! Signin reports the same [`AppError::InvalidCredentials`] whether the email
//! is unknown or the password is wrong. An unknown email still pays for one
//! Argon2 verify against a throwaway hash, so response time does not reveal
//! which emails are registered.

use std::sync::{Arc, LazyLock};

use lib_auth::{hash_password, verify_password, TokenCodec};
use lib_core::error::is_unique_violation;
use lib_core::model::store::UserRepository;
use lib_core::{AppError, DbPool, Result};
use lib_utils::validate_email;
use tracing::{debug, info, instrument, warn};

/// Hash verified against when the email is unknown. `None` only if hashing failed.
static UNKNOWN_USER_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("unknown-user-placeholder").ok());

/// Result of a successful signup or signin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub user_id: i64,
    pub token: String,
}

/// Orchestrates signup and signin.
#[derive(Clone)]
pub struct AuthService {
    db: DbPool,
    tokens: Arc<TokenCodec>,
}

impl AuthService {
    pub fn new(db: DbPool, tokens: Arc<TokenCodec>) -> Self {
        Self { db, tokens }
    }

    /// Register a new user and issue a token for them.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] - malformed email or empty password
    /// - [`AppError::DuplicateEmail`] - email already registered
    /// - [`AppError::StoreUnavailable`] - database failure
    #[instrument(skip(self, email, password))]
    pub async fn signup(&self, email: &str, password: &str) -> Result<AuthOutcome> {
        validate_email(email).map_err(AppError::InvalidInput)?;
        if password.is_empty() {
            return Err(AppError::InvalidInput("Password cannot be empty".to_string()));
        }

        debug!("[SIGNUP] Hashing password...");
        let password = password.to_string();
        let hash = run_blocking(move || hash_password(&password)).await??;

        debug!("[SIGNUP] Creating user in database...");
        let user = match UserRepository::create(&self.db, email, &hash).await {
            Ok(user) => user,
            Err(e) if is_unique_violation(&e) => {
                warn!("[SIGNUP] Email already registered");
                return Err(AppError::DuplicateEmail);
            }
            Err(e) => return Err(e.into()),
        };

        let token = self.tokens.issue(user.id)?;
        info!(user_id = user.id, "[SIGNUP] User created");

        Ok(AuthOutcome {
            user_id: user.id,
            token,
        })
    }

    /// Authenticate an existing user and issue a fresh token.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidCredentials`] - unknown email or wrong password
    /// - [`AppError::StoreUnavailable`] - database failure
    #[instrument(skip(self, email, password))]
    pub async fn signin(&self, email: &str, password: &str) -> Result<AuthOutcome> {
        let user = UserRepository::find_by_email(&self.db, email).await?;

        let password = password.to_string();
        let hash = user.as_ref().map(|u| u.hash.clone());
        let is_valid = run_blocking(move || match hash {
            Some(hash) => verify_password(&password, &hash),
            None => {
                if let Some(placeholder) = UNKNOWN_USER_HASH.as_deref() {
                    verify_password(&password, placeholder);
                }
                false
            }
        })
        .await?;

        let Some(user) = user else {
            warn!("[SIGNIN] Unknown email");
            return Err(AppError::InvalidCredentials);
        };

        if !is_valid {
            warn!(user_id = user.id, "[SIGNIN] Wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id)?;
        info!(user_id = user.id, "[SIGNIN] User authenticated");

        Ok(AuthOutcome {
            user_id: user.id,
            token,
        })
    }
}

/// Run CPU-bound work on tokio's blocking pool.
async fn run_blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("Blocking task failed: {}", e)))
}
