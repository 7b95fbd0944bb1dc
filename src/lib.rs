//! Wander: a noisy web traffic generator
//!
//! This crate implements a randomized crawler that walks the web graph from a
//! set of seed URLs, producing unstructured, human-looking browsing traffic.
//! It follows links at random to a bounded depth, retires dead links into a
//! permanent blacklist, and stops cleanly on timeout or interrupt.

pub mod config;
pub mod crawler;
pub mod lifecycle;
pub mod url;

use thiserror::Error;

/// Main error type for Wander operations
#[derive(Debug, Error)]
pub enum WanderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Unrecoverable fetch error for {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Wander operations
pub type Result<T> = std::result::Result<T, WanderError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use lifecycle::{Lifecycle, StopReason};
pub use url::{is_valid_url, normalize_link, Blacklist};
