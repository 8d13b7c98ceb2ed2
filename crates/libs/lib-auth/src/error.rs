//! # Authentication Errors

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised by the password hasher and the token codec.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Empty or otherwise unusable input (e.g. an empty password).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The token is structurally malformed.
    #[error("Invalid token")]
    InvalidToken,

    /// The token signature does not match its contents.
    #[error("Token signature mismatch")]
    TokenTampered,

    /// The token is past its expiry time.
    #[error("Token expired")]
    TokenExpired,

    /// Hashing or signing failed inside the underlying primitive.
    #[error("Signing failed: {0}")]
    Signing(String),
}
