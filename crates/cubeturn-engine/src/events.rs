//! Events and snapshots published to the presentation layer.

use cubeturn_geometry::{Axis, GridCoord, Move, Slice};
use serde::Serialize;

use crate::autoplay::MoveLabel;
use crate::error::Rejection;

/// Things that happened inside the controller, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum CubeEvent {
    /// A slice started turning
    MoveStarted {
        #[serde(rename = "move")]
        mv: Move,
        axis: Axis,
        slice: Slice,
        cubelets: usize,
    },

    /// A slice finished turning and its orientation was baked
    MoveCompleted {
        #[serde(rename = "move")]
        mv: Move,
    },

    /// A move label should be shown transiently
    MoveDisplayed { label: String },

    /// The transient move label expired
    DisplayCleared,

    /// Reverse mode changed (swap direction indicator)
    DirectionChanged { reverse: bool },

    /// A user-visible rejection
    Notice { message: String, rejection: Rejection },

    /// Scripted playback took over
    AutoSolveStarted { tokens: usize, moves: usize },

    /// Scripted playback reached the next logical move
    AutoSolveLabel(MoveLabel),

    /// Scripted playback released manual control
    AutoSolveFinished { cancelled: bool },

    /// Every cubelet returned to its solved orientation
    CubeReset,
}

/// Answer to a state query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CubeState {
    pub is_animating: bool,
    pub reverse_mode: bool,
    pub history_depth: usize,
    pub autosolve: bool,
    pub active_move: Option<Move>,
    pub display: Option<String>,
    pub is_solved: bool,
}

/// Render transform of one cubelet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CubeletTransform {
    pub home: GridCoord,
    /// Rotation as `[x, y, z, w]`, including any in-flight slice rotation.
    pub orientation: [f32; 4],
    /// Position in the cube's own frame.
    pub position: [f32; 3],
}
