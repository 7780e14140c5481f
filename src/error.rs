//! Error types for freenom-ddns.

use thiserror::Error;

/// Result type alias for freenom-ddns.
pub type Result<T> = std::result::Result<T, DdnsError>;

/// DDNS error types.
#[derive(Error, Debug)]
pub enum DdnsError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network/HTTP error.
    #[error("Network error: {0}")]
    Network(String),

    /// IP detection error.
    #[error("IP detection failed: {0}")]
    IpDetection(String),

    /// The portal rejected the login credentials.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The portal did not treat the session as logged in.
    #[error("Session error: {0}")]
    Session(String),

    /// The management page did not have the expected shape.
    #[error("Scrape error: {0}")]
    Scrape(String),

    /// A record's TTL field was not an integer.
    #[error("Record {row} has a non-integer TTL {value:?}")]
    Ttl { row: usize, value: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for DdnsError {
    fn from(e: reqwest::Error) -> Self {
        DdnsError::Network(e.to_string())
    }
}

impl From<toml::de::Error> for DdnsError {
    fn from(e: toml::de::Error) -> Self {
        DdnsError::Config(e.to_string())
    }
}
