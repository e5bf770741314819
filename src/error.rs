//! Error types for docent.
//!
//! Extraction itself never fails: faults inside a pass are logged and turn
//! into "no candidates from this rule". These errors surface only from
//! configuration loading, pluggable suggesters, and serialization.

use thiserror::Error;

/// Result type for docent operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for docent operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// A rule pattern failed to compile.
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// An entity suggester failed.
    #[error("Suggester error: {0}")]
    Suggester(String),

    /// JSON serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a pattern error.
    pub fn pattern(msg: impl Into<String>) -> Self {
        Error::Pattern(msg.into())
    }

    /// Create a suggester error.
    pub fn suggester(msg: impl Into<String>) -> Self {
        Error::Suggester(msg.into())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Pattern(err.to_string())
    }
}
