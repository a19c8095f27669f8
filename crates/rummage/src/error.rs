//! Error types for the rummage crate.
//!
//! Searching and resolving never fail; errors only come from building a
//! search (invalid regex) or from turning external text into a [`Node`].
//!
//! [`Node`]: crate::Node

use thiserror::Error;

/// Errors that can occur when building a search or loading a haystack.
#[derive(Debug, Error)]
pub enum RummageError {
    /// Invalid regular expression pattern.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// The input was not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The input was not valid YAML.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A mapping key could not be represented as a [`Key`](crate::Key).
    #[error("unsupported mapping key: {kind} keys cannot be addressed")]
    UnsupportedKey { kind: &'static str },
}

/// Result type for rummage operations.
pub type Result<T> = std::result::Result<T, RummageError>;
