//! Error types for cubeturn-vis.

use thiserror::Error;

/// Result type for server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can stop the server from starting or running.
#[derive(Debug, Error)]
pub enum Error {
    /// Engine construction or session storage failed
    #[error("Engine error: {0}")]
    Engine(#[from] cubeturn_engine::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An environment variable held an unusable value
    #[error("Invalid config {key}: {reason}")]
    Config { key: String, reason: String },
}
