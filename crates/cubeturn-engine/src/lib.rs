//! Cubeturn Engine
//!
//! Animated face rotations and move coordination for a 3×3×3 cube.
//!
//! # Architecture
//!
//! - **Cube**: fixed arena of 27 cubelets with baked orientations
//! - **Animator**: one quarter turn in flight at a time, eased over a fixed duration
//! - **Guard**: refuses moves that would collide with the active rotation
//! - **History**: bounded undo stack, optionally persisted between sessions
//! - **Scheduler**: manual input decoding, cooldown and autosolve lock
//! - **Autoplay**: timed replay of a solution's primitive tokens
//! - **Controller**: single-threaded facade driving all of the above from `tick`
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use cubeturn_engine::{CubeController, EngineConfig};
//!
//! let mut cube = CubeController::new(EngineConfig::default()).unwrap();
//! let ticket = cube.submit_move("R").unwrap();
//! cube.tick(Duration::from_millis(300));
//!
//! assert_eq!(cube.history().to_tokens(), vec!["R"]);
//! drop(ticket);
//! ```

mod animator;
mod autoplay;
mod config;
mod controller;
mod cube;
mod error;
mod events;
mod guard;
mod history;
mod persistence;
mod scheduler;

pub use animator::{
    ease_in_out_cubic, ActiveRotation, AnimatorState, MoveTicket, RotationAnimator, SliceFrame,
};
pub use autoplay::{AutoPlaySequencer, Cue, MoveLabel, PlaybackState, PlaybackStatus};
pub use config::{EngineConfig, MAX_HISTORY_LIMIT};
pub use controller::{CubeController, InputOutcome};
pub use cube::{Cube, Cubelet, SliceMask};
pub use error::{BusyReason, Error, Rejection, Result};
pub use events::{CubeEvent, CubeState, CubeletTransform};
pub use guard::{can_start, check};
pub use history::MoveHistory;
pub use persistence::{JsonFileStore, MemoryStore, SessionStore};
pub use scheduler::{InputScheduler, InputToken, FORWARD_TOKEN, REVERSE_TOKEN};

pub use cubeturn_geometry::{Face, Move, PlayToken};
