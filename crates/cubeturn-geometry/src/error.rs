//! Error types for cubeturn-geometry.

use thiserror::Error;

/// Result type for notation parsing.
pub type Result<T> = std::result::Result<T, NotationError>;

/// Errors produced while decoding move notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    /// The token had no characters.
    #[error("empty move token")]
    Empty,

    /// The first character is not a known face letter.
    #[error("unknown face letter '{0}'")]
    UnknownFace(char),

    /// The token is not valid in this position of the grammar.
    #[error("invalid token \"{0}\"")]
    InvalidToken(String),
}
