//! # Environment Variables
//!
//! Utilities for reading and parsing environment variables.

use std::env;
use std::str::FromStr;

/// Get an environment variable by name.
pub fn get_env(name: &'static str) -> Result<String, Error> {
    env::var(name).map_err(|_| Error::MissingEnv(name))
}

/// Get an environment variable, falling back to `default` when it is unset.
pub fn get_env_or(name: &'static str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Get and parse an environment variable.
pub fn get_env_parse<T: FromStr>(name: &'static str) -> Result<T, Error> {
    let val = get_env(name)?;
    val.parse::<T>().map_err(|_| Error::WrongFormat(name))
}

// region:    --- Error
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    MissingEnv(&'static str),
    WrongFormat(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::MissingEnv(name) => write!(fmt, "{name} must be set in environment"),
            Error::WrongFormat(name) => write!(fmt, "{name} has an invalid format"),
        }
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_env_or_falls_back() {
        let value = get_env_or("LIB_UTILS_TEST_SURELY_UNSET_VAR", "fallback");
        assert_eq!(value, "fallback");
    }

    #[test]
    fn test_get_env_parse() {
        std::env::set_var("LIB_UTILS_TEST_PARSE_OK", "12");
        std::env::set_var("LIB_UTILS_TEST_PARSE_BAD", "twelve");

        assert_eq!(get_env_parse::<usize>("LIB_UTILS_TEST_PARSE_OK"), Ok(12));
        assert_eq!(
            get_env_parse::<usize>("LIB_UTILS_TEST_PARSE_BAD"),
            Err(Error::WrongFormat("LIB_UTILS_TEST_PARSE_BAD"))
        );
        assert_eq!(
            get_env_parse::<usize>("LIB_UTILS_TEST_SURELY_UNSET_VAR"),
            Err(Error::MissingEnv("LIB_UTILS_TEST_SURELY_UNSET_VAR"))
        );
    }

    #[test]
    fn test_missing_env_message() {
        let err = get_env("LIB_UTILS_TEST_SURELY_UNSET_VAR").unwrap_err();
        assert_eq!(err, Error::MissingEnv("LIB_UTILS_TEST_SURELY_UNSET_VAR"));
        assert_eq!(
            err.to_string(),
            "LIB_UTILS_TEST_SURELY_UNSET_VAR must be set in environment"
        );
    }
}
