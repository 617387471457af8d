//! Error types for cubeturn-engine.
//!
//! Two families live here. [`Rejection`] is the outcome of a refused user or
//! playback request: it is returned as a value and never leaves engine state
//! half-modified. [`Error`] covers infrastructure failures (session storage,
//! configuration) that callers may want to propagate with `?`.

use std::time::Duration;

use cubeturn_geometry::{Face, NotationError};
use serde::Serialize;
use thiserror::Error;

/// Result type for engine infrastructure operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a busy animator refused a start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BusyReason {
    /// The active rotation is on a different axis group.
    AxisConflict,
    /// The active rotation shares the axis group; only one rotation runs at a time.
    SliceLocked,
    /// A reset or autosolve start needs the animator idle.
    NotIdle,
}

/// A refused operation. State is untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejection {
    /// The token is not valid move notation.
    #[error("invalid move notation \"{token}\": {reason}")]
    InvalidNotation { token: String, reason: String },

    /// A rotation is in flight.
    #[error("cube is busy turning {active}")]
    Busy { active: Face, reason: BusyReason },

    /// The face move arrived inside the cooldown window.
    #[error("too quick, wait {remaining:?}")]
    Cooldown { remaining: Duration },

    /// Nothing to undo.
    #[error("no moves to undo")]
    EmptyHistory,

    /// Manual input is locked while autosolve runs.
    #[error("manual moves are disabled during autosolve")]
    LockedMode,
}

impl Rejection {
    /// Build an `InvalidNotation` rejection from a decode failure.
    pub fn invalid_notation(token: &str, err: &NotationError) -> Self {
        Rejection::InvalidNotation {
            token: token.to_string(),
            reason: err.to_string(),
        }
    }

    /// Whether the notification layer should show this to the user.
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self,
            Rejection::InvalidNotation { .. } | Rejection::Cooldown { .. } | Rejection::LockedMode
        )
    }
}

/// Errors from engine infrastructure.
#[derive(Debug, Error)]
pub enum Error {
    /// Session storage IO failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Session storage is unusable (e.g. a poisoned lock).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Session data could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A configuration value is invalid.
    #[error("Invalid config {key}: {reason}")]
    Config { key: String, reason: String },
}
