//! Engine tuning.

use std::time::Duration;

use cubeturn_geometry::DEFAULT_SPACING;

use crate::error::{Error, Result};

/// Largest undo history the engine will keep.
pub const MAX_HISTORY_LIMIT: usize = 10_000;

/// Timing and capacity settings for a [`CubeController`](crate::CubeController).
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Duration of one animated quarter turn.
    pub turn_duration: Duration,
    /// Minimum interval between accepted manual face moves.
    pub cooldown: Duration,
    /// Maximum number of undoable moves kept.
    pub history_limit: usize,
    /// How long a completed move label stays visible.
    pub display_duration: Duration,
    /// Autosolve delay after a single turn.
    pub single_turn_delay: Duration,
    /// Autosolve delay after the first half of a double turn.
    pub double_turn_delay: Duration,
    /// Distance between adjacent cubelet centers.
    pub spacing: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            turn_duration: Duration::from_millis(300),
            cooldown: Duration::from_millis(100),
            history_limit: 10,
            display_duration: Duration::from_millis(700),
            single_turn_delay: Duration::from_millis(500),
            double_turn_delay: Duration::from_millis(300),
            spacing: DEFAULT_SPACING,
        }
    }
}

impl EngineConfig {
    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.turn_duration.is_zero() {
            return Err(Error::Config {
                key: "turn_duration".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.history_limit == 0 {
            return Err(Error::Config {
                key: "history_limit".into(),
                reason: "must keep at least one move".into(),
            });
        }
        if self.history_limit > MAX_HISTORY_LIMIT {
            return Err(Error::Config {
                key: "history_limit".into(),
                reason: format!(
                    "{} exceeds the maximum of {}",
                    self.history_limit, MAX_HISTORY_LIMIT
                ),
            });
        }
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(Error::Config {
                key: "spacing".into(),
                reason: format!("{} is not a positive distance", self.spacing),
            });
        }
        Ok(())
    }
}
