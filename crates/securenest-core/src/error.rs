//! Error types for SecureNest

use thiserror::Error;

/// Result type alias using SecureNest's Error
pub type Result<T> = std::result::Result<T, Error>;

/// SecureNest error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Network error: {0}. Check your internet connection.")]
    Network(#[from] reqwest::Error),

    #[error("Breach lookup failed: {0}")]
    BreachLookup(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
