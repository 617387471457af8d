//! Cubeturn Geometry
//!
//! Discrete geometry of a 3×3×3 twisty cube.
//!
//! # Coordinate Model
//!
//! Every cubelet is identified by its home position on a 3×3×3 grid, a triple
//! of offsets in {-1, 0, +1}. Rendered positions are those offsets scaled by a
//! fixed spacing. Three axes each cut the cube into three slices:
//! - X: L (-1), M (0), R (+1)
//! - Y: D (-1), U (+1)
//! - Z: B (-1), F (+1)
//!
//! Continuous positions drift as rotations accumulate in floating point, so
//! slice membership is always decided by snapping to the nearest plane
//! (see [`Slice::classify`]).
//!
//! # Notation
//!
//! A move is a face letter optionally followed by an apostrophe for the
//! reverse direction (`R`, `R'`). Scripted playback consumes a primitive token
//! stream in which `1`/`2` select forward/reverse and double turns appear as a
//! repeated letter (see [`expand_solution`]).

mod coord;
mod error;
mod face;
mod notation;
mod slice;

pub use coord::GridCoord;
pub use error::{NotationError, Result};
pub use face::{Face, FaceDescriptor};
pub use notation::{expand_solution, parse_play_tokens, Move, PlayToken};
pub use slice::{classify, Axis, Slice, DEFAULT_SPACING};

/// Number of cubelets in the grid (including the hidden core).
pub const CUBELET_COUNT: usize = 27;

/// Number of cubelets in any one slice.
pub const SLICE_SIZE: usize = 9;

/// Angle of a quarter turn in radians.
pub const QUARTER_TURN: f32 = std::f32::consts::FRAC_PI_2;

// Three slices per axis, nine cubelets per slice
const _: () = assert!(SLICE_SIZE * 3 == CUBELET_COUNT);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_partition_the_grid() {
        for axis in Axis::ALL {
            let total: usize = Slice::ALL
                .iter()
                .map(|&slice| GridCoord::all().filter(|c| c.slice_along(axis) == slice).count())
                .sum();
            assert_eq!(total, CUBELET_COUNT);
        }
    }

    #[test]
    fn every_face_slice_has_nine_members() {
        for face in Face::ALL {
            let members = GridCoord::all()
                .filter(|c| c.slice_along(face.axis()) == face.slice())
                .count();
            assert_eq!(members, SLICE_SIZE, "face {face}");
        }
    }
}
