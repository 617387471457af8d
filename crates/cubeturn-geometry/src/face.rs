//! The face descriptor table.
//!
//! Every face maps to exactly one (axis, slice, forward sign) entry. Manual
//! input, undo and scripted playback all resolve faces through this table.

use crate::slice::{Axis, Slice};
use crate::QUARTER_TURN;

/// A turnable face (or the M middle slice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Face {
    R,
    L,
    M,
    U,
    D,
    F,
    B,
}

/// Static description of a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceDescriptor {
    pub face: Face,
    pub letter: char,
    pub axis: Axis,
    pub slice: Slice,
    /// Sign of the quarter-turn angle for the forward direction.
    pub forward_sign: i8,
}

const fn entry(
    face: Face,
    letter: char,
    axis: Axis,
    slice: Slice,
    forward_sign: i8,
) -> FaceDescriptor {
    FaceDescriptor {
        face,
        letter,
        axis,
        slice,
        forward_sign,
    }
}

static DESCRIPTORS: [FaceDescriptor; 7] = [
    entry(Face::R, 'R', Axis::X, Slice::Positive, -1),
    entry(Face::L, 'L', Axis::X, Slice::Negative, 1),
    entry(Face::M, 'M', Axis::X, Slice::Middle, -1),
    entry(Face::U, 'U', Axis::Y, Slice::Positive, -1),
    entry(Face::D, 'D', Axis::Y, Slice::Negative, 1),
    entry(Face::F, 'F', Axis::Z, Slice::Positive, -1),
    entry(Face::B, 'B', Axis::Z, Slice::Negative, 1),
];

impl Face {
    /// All faces in table order.
    pub const ALL: [Self; 7] = [Self::R, Self::L, Self::M, Self::U, Self::D, Self::F, Self::B];

    /// This face's table entry.
    pub fn descriptor(self) -> &'static FaceDescriptor {
        &DESCRIPTORS[self as usize]
    }

    /// Notation letter.
    pub fn letter(self) -> char {
        self.descriptor().letter
    }

    /// Rotation axis (also the face's mutual-exclusion group).
    pub fn axis(self) -> Axis {
        self.descriptor().axis
    }

    /// Slice turned by this face.
    pub fn slice(self) -> Slice {
        self.descriptor().slice
    }

    /// Face for a notation letter.
    pub fn from_letter(letter: char) -> Option<Self> {
        DESCRIPTORS.iter().find(|d| d.letter == letter).map(|d| d.face)
    }

    /// Whether two faces belong to different axis groups.
    pub fn conflicts_with(self, other: Face) -> bool {
        self.axis() != other.axis()
    }

    /// Sign of the turn angle; reverse negates the forward sign.
    pub fn sign(self, reverse: bool) -> i8 {
        let forward = self.descriptor().forward_sign;
        if reverse {
            -forward
        } else {
            forward
        }
    }

    /// Signed quarter-turn angle in radians.
    pub fn quarter_turn(self, reverse: bool) -> f32 {
        QUARTER_TURN * f32::from(self.sign(reverse))
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_face() {
        for face in Face::ALL {
            assert_eq!(face.descriptor().face, face);
        }
    }

    #[test]
    fn letters_round_trip() {
        for face in Face::ALL {
            assert_eq!(Face::from_letter(face.letter()), Some(face));
        }
        assert_eq!(Face::from_letter('X'), None);
        assert_eq!(Face::from_letter('r'), None);
    }

    #[test]
    fn axis_groups() {
        assert_eq!(Face::R.axis(), Axis::X);
        assert_eq!(Face::L.axis(), Axis::X);
        assert_eq!(Face::M.axis(), Axis::X);
        assert_eq!(Face::U.axis(), Axis::Y);
        assert_eq!(Face::D.axis(), Axis::Y);
        assert_eq!(Face::F.axis(), Axis::Z);
        assert_eq!(Face::B.axis(), Axis::Z);

        assert!(!Face::R.conflicts_with(Face::L));
        assert!(!Face::R.conflicts_with(Face::M));
        assert!(Face::R.conflicts_with(Face::U));
        assert!(Face::U.conflicts_with(Face::F));
    }

    #[test]
    fn opposite_faces_turn_opposite_ways() {
        assert_eq!(Face::R.sign(false), -Face::L.sign(false));
        assert_eq!(Face::U.sign(false), -Face::D.sign(false));
        assert_eq!(Face::F.sign(false), -Face::B.sign(false));
        // M follows L in standard notation but this table turns it with R
        assert_eq!(Face::M.sign(false), Face::R.sign(false));
    }

    #[test]
    fn reverse_negates() {
        for face in Face::ALL {
            assert_eq!(face.sign(true), -face.sign(false));
            assert_eq!(face.quarter_turn(true), -face.quarter_turn(false));
        }
        assert_eq!(Face::R.quarter_turn(false), -QUARTER_TURN);
    }
}
