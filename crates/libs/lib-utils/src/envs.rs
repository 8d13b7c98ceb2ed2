//! # Environment Variables
//!
//! Utilities for reading and parsing environment variables.

use std::env;
use std::str::FromStr;

/// Get an environment variable by name.
pub fn get_env(name: &'static str) -> Result<String, Error> {
    env::var(name).map_err(|_| Error::MissingEnv(name))
}

/// Get an environment variable, falling back to `default` when unset.
pub fn get_env_or(name: &'static str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, using `default` when unset.
///
/// A variable that is set but cannot be parsed is still an error.
pub fn get_env_parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, Error> {
    match env::var(name) {
        Ok(val) => val.parse::<T>().map_err(|_| Error::WrongFormat(name)),
        Err(_) => Ok(default),
    }
}

// region:    --- Error
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{0} must be set in environment")]
    MissingEnv(&'static str),
    #[error("{0} has an invalid format")]
    WrongFormat(&'static str),
}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env() {
        let result = get_env("LIB_UTILS_TEST_SURELY_UNSET");
        assert_eq!(result, Err(Error::MissingEnv("LIB_UTILS_TEST_SURELY_UNSET")));
    }

    #[test]
    fn test_parse_or_default_when_unset() {
        let value: i64 = get_env_parse_or("LIB_UTILS_TEST_UNSET_NUMBER", 24)
            .expect("Unset variable should fall back to default");
        assert_eq!(value, 24);
    }

    #[test]
    fn test_env_or_default_when_unset() {
        assert_eq!(get_env_or("LIB_UTILS_TEST_UNSET_STRING", "fallback"), "fallback");
    }
}
