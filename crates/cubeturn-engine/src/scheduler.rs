//! Manual input filtering.
//!
//! Raw input tokens are decoded, then admitted or refused before they reach
//! the animator:
//! - unknown tokens are refused as invalid notation
//! - everything is refused while autosolve owns the cube
//! - face moves inside the cooldown window after the last accepted face move
//!   are refused; direction changes and undo are exempt

use std::time::Duration;

use cubeturn_geometry::Move;

use crate::error::Rejection;

/// Direction token: forward.
pub const FORWARD_TOKEN: &str = "1";
/// Direction token: reverse.
pub const REVERSE_TOKEN: &str = "2";

/// A decoded manual input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputToken {
    /// Turn a face. The move is as typed, before reverse mode is applied.
    Turn(Move),
    /// Select forward (`false`) or reverse (`true`) for following turns.
    Direction { reverse: bool },
    /// Undo the most recent recorded move.
    Undo,
}

impl InputToken {
    /// Decode a raw token.
    pub fn parse(raw: &str) -> Result<Self, Rejection> {
        match raw {
            FORWARD_TOKEN => Ok(InputToken::Direction { reverse: false }),
            REVERSE_TOKEN => Ok(InputToken::Direction { reverse: true }),
            "undo" | "ctrl+z" | "Ctrl+Z" => Ok(InputToken::Undo),
            _ => Move::parse(raw)
                .map(InputToken::Turn)
                .map_err(|e| Rejection::invalid_notation(raw, &e)),
        }
    }

    pub fn is_face_move(&self) -> bool {
        matches!(self, InputToken::Turn(_))
    }
}

/// Debounces manual face moves.
#[derive(Debug, Clone)]
pub struct InputScheduler {
    cooldown: Duration,
    last_accepted: Option<Duration>,
}

impl InputScheduler {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_accepted: None,
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Decide whether `token` may be forwarded at `now`.
    pub fn admit(
        &self,
        token: &InputToken,
        now: Duration,
        autosolve: bool,
    ) -> Result<(), Rejection> {
        if autosolve {
            return Err(Rejection::LockedMode);
        }
        if !token.is_face_move() {
            return Ok(());
        }
        if let Some(last) = self.last_accepted {
            let since = now.saturating_sub(last);
            if since < self.cooldown {
                return Err(Rejection::Cooldown {
                    remaining: self.cooldown - since,
                });
            }
        }
        Ok(())
    }

    /// Start a new cooldown window at `now`.
    pub fn mark_accepted(&mut self, now: Duration) {
        self.last_accepted = Some(now);
    }
}
