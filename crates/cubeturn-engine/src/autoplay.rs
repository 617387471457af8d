//! Scripted playback of a primitive move list.
//!
//! The sequencer only decides *what* comes next and *when*; the controller
//! executes each cue through the normal animator path. Timing policy:
//! - direction tokens play with no delay
//! - a turn followed by the same turn (a double) waits the short delay and
//!   emits one merged `X2` label
//! - any other turn waits the long delay and emits its own label, unless it
//!   is the second half of a double

use std::time::Duration;

use cubeturn_geometry::{Face, Move, PlayToken};
use serde::{Deserialize, Serialize};

/// Current state of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Nothing loaded or playing
    Stopped,
    /// Tokens are being played
    Playing,
    /// Every token has been played
    Finished,
    /// Stopped early by request
    Cancelled,
}

/// What the controller should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Switch global direction.
    Direction { reverse: bool },
    /// Turn a face in the current direction.
    Turn(Face),
    /// The list is exhausted; release manual control.
    Finished,
}

/// A logical move label for the solution display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLabel {
    /// Position in the logical (unexpanded) move list.
    pub index: usize,
    pub text: String,
}

/// Replays primitive tokens with double-turn-aware timing.
#[derive(Debug, Clone)]
pub struct AutoPlaySequencer {
    tokens: Vec<PlayToken>,
    cursor: usize,
    state: PlaybackState,
    next_due: Duration,
    reverse: bool,
    labels_shown: usize,
    single_delay: Duration,
    double_delay: Duration,
}

impl AutoPlaySequencer {
    pub fn new(single_delay: Duration, double_delay: Duration) -> Self {
        Self {
            tokens: Vec::new(),
            cursor: 0,
            state: PlaybackState::Stopped,
            next_due: Duration::ZERO,
            reverse: false,
            labels_shown: 0,
            single_delay,
            double_delay,
        }
    }

    /// Load `tokens` and make the first one due at `now`.
    ///
    /// Playback always begins in the forward direction.
    pub fn start(&mut self, tokens: Vec<PlayToken>, now: Duration) {
        self.tokens = tokens;
        self.cursor = 0;
        self.state = PlaybackState::Playing;
        self.next_due = now;
        self.reverse = false;
        self.labels_shown = 0;
    }

    pub fn cancel(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Cancelled;
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn current_token(&self) -> usize {
        self.cursor
    }

    pub fn total_tokens(&self) -> usize {
        self.tokens.len()
    }

    /// Number of logical moves labelled so far.
    pub fn labels_shown(&self) -> usize {
        self.labels_shown
    }

    /// Number of logical moves in the loaded list (doubles count once).
    pub fn logical_moves(&self) -> usize {
        (0..self.tokens.len())
            .filter(|&i| matches!(self.tokens[i], PlayToken::Turn(_)) && !self.is_second_half(i))
            .count()
    }

    /// The cue due at `now`, if any. Does not consume it.
    pub fn poll(&self, now: Duration) -> Option<Cue> {
        if self.state != PlaybackState::Playing || now < self.next_due {
            return None;
        }
        Some(match self.tokens.get(self.cursor) {
            None => Cue::Finished,
            Some(PlayToken::Forward) => Cue::Direction { reverse: false },
            Some(PlayToken::Reverse) => Cue::Direction { reverse: true },
            Some(PlayToken::Turn(face)) => Cue::Turn(*face),
        })
    }

    /// Consume the current cue after the controller executed it at `now`.
    ///
    /// Schedules the next cue and returns the label to display, if this
    /// token starts a logical move.
    pub fn advance(&mut self, now: Duration) -> Option<MoveLabel> {
        let Some(&token) = self.tokens.get(self.cursor) else {
            self.state = PlaybackState::Finished;
            return None;
        };

        let label = match token {
            PlayToken::Forward | PlayToken::Reverse => {
                self.reverse = token == PlayToken::Reverse;
                self.next_due = now;
                None
            }
            PlayToken::Turn(face) => {
                let doubled = self.tokens.get(self.cursor + 1) == Some(&token);
                let second_half = self.is_second_half(self.cursor);
                self.next_due = now + if doubled { self.double_delay } else { self.single_delay };

                let text = if second_half {
                    None
                } else if doubled {
                    Some(format!("{face}2"))
                } else {
                    Some(Move::new(face, self.reverse).notation())
                };
                text.map(|text| {
                    let label = MoveLabel {
                        index: self.labels_shown,
                        text,
                    };
                    self.labels_shown += 1;
                    label
                })
            }
        };

        self.cursor += 1;
        label
    }

    /// Mark playback complete once [`Cue::Finished`] has been handled.
    pub fn finish(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Finished;
        }
    }

    /// Calculate progress as a fraction (0.0 - 1.0).
    pub fn progress(&self) -> f64 {
        if self.tokens.is_empty() {
            0.0
        } else {
            self.cursor as f64 / self.tokens.len() as f64
        }
    }

    fn is_second_half(&self, index: usize) -> bool {
        index > 0
            && matches!(self.tokens[index], PlayToken::Turn(_))
            && self.tokens[index - 1] == self.tokens[index]
    }
}

/// Playback status for sending to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub current_token: usize,
    pub total_tokens: usize,
    pub labels_shown: usize,
    pub logical_moves: usize,
    pub state: PlaybackState,
    pub progress: f64,
}

impl From<&AutoPlaySequencer> for PlaybackStatus {
    fn from(sequencer: &AutoPlaySequencer) -> Self {
        Self {
            current_token: sequencer.cursor,
            total_tokens: sequencer.total_tokens(),
            labels_shown: sequencer.labels_shown,
            logical_moves: sequencer.logical_moves(),
            state: sequencer.state,
            progress: sequencer.progress(),
        }
    }
}
