//! # Bearer Token Codec
//!
//! Signs a user id into an HS256 JWT and verifies it back.
//!
//! The codec is built once from the signing secret and shared read-only
//! across requests; it never reads configuration on its own.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// JWT Claims structure carried by every issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// Issues and verifies bearer tokens with a fixed secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiration: Duration,
}

impl TokenCodec {
    /// Create a codec signing with `secret`; tokens expire after `expiration_hours`.
    pub fn new(secret: &str, expiration_hours: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expiration: Duration::hours(expiration_hours),
        }
    }

    /// Issue a signed token for `user_id`.
    pub fn issue(&self, user_id: i64) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + self.expiration).timestamp(),
            iat: now.timestamp(),
        };

        self.sign(&claims)
    }

    /// Verify `token` and return the user id it was issued for.
    pub fn verify(&self, token: &str) -> Result<i64> {
        let claims = self.decode_claims(token)?;
        claims.sub.parse::<i64>().map_err(|_| Error::InvalidToken)
    }

    /// Verify `token` and return its full claims.
    pub fn decode_claims(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(Error::from)
    }

    fn sign(&self, claims: &Claims) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| Error::Signing(format!("Failed to encode JWT: {}", e)))
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("expiration", &self.expiration)
            .finish_non_exhaustive()
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => Error::TokenExpired,
            ErrorKind::InvalidSignature => Error::TokenTampered,
            _ => Error::InvalidToken,
        }
    }
}
