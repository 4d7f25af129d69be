//! Error types for the API client and persistence layer.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for API and persistence operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur talking to the tracker or its on-disk state.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Home directory could not be resolved.
    #[error("unable to locate home directory")]
    NoHomeDir,

    /// The tracker answered with an error body instead of the payload.
    #[error("tracker error {code}: {message}")]
    Api { code: u32, message: String },

    /// Cache file missing or unreadable.
    #[error("cache is empty or invalid at '{0}'; try running the tool again")]
    InvalidCache(PathBuf),

    /// HTTP transport error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
