//! Cubelet identities on the 3×3×3 grid.

use crate::slice::{Axis, Slice};

/// A home position on the 3×3×3 grid.
///
/// Each component is an offset in {-1, 0, +1}. The all-zero triple is the
/// hidden core: it belongs to the middle slice of every axis but is never
/// visible on an outer face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCoord {
    pub x: i8,
    pub y: i8,
    pub z: i8,
}

impl GridCoord {
    /// The hidden core.
    pub const ORIGIN: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a new coordinate.
    pub const fn new(x: i8, y: i8, z: i8) -> Self {
        Self { x, y, z }
    }

    /// Whether every component is on the grid.
    pub const fn is_on_grid(&self) -> bool {
        self.x >= -1 && self.x <= 1 && self.y >= -1 && self.y <= 1 && self.z >= -1 && self.z <= 1
    }

    /// Whether this is the hidden core.
    pub const fn is_core(&self) -> bool {
        self.x == 0 && self.y == 0 && self.z == 0
    }

    /// Offset along one axis.
    pub const fn along(&self, axis: Axis) -> i8 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// The slice this coordinate occupies along an axis.
    pub fn slice_along(&self, axis: Axis) -> Slice {
        Slice::from_offset(self.along(axis).signum()).unwrap_or(Slice::Middle)
    }

    /// Dense index in `0..27`, x-major.
    pub const fn index(&self) -> usize {
        ((self.x + 1) as usize) * 9 + ((self.y + 1) as usize) * 3 + (self.z + 1) as usize
    }

    /// Inverse of [`GridCoord::index`].
    pub const fn from_index(index: usize) -> Option<Self> {
        if index >= 27 {
            return None;
        }
        Some(Self {
            x: (index / 9) as i8 - 1,
            y: ((index / 3) % 3) as i8 - 1,
            z: (index % 3) as i8 - 1,
        })
    }

    /// World position at the given spacing.
    pub fn to_position(&self, spacing: f32) -> [f32; 3] {
        [
            f32::from(self.x) * spacing,
            f32::from(self.y) * spacing,
            f32::from(self.z) * spacing,
        ]
    }

    /// All 27 grid positions in index order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..27).filter_map(Self::from_index)
    }
}

impl std::fmt::Display for GridCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
