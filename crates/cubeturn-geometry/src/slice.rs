//! Rotation axes and slice classification.
//!
//! A slice is one of the three planes perpendicular to an axis. Positions are
//! snapped to the nearest plane with a fixed tie-break: anything that is not
//! strictly closest to the middle or strictly closest to the negative plane
//! lands on the positive plane. Degenerate inputs (exact midpoints, NaN)
//! therefore always classify the same way.

/// Spacing between adjacent cubelet centers in world units.
pub const DEFAULT_SPACING: f32 = 1.1;

/// One of the three rotation axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in component order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Component index of this axis in an `[x, y, z]` triple.
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector along this axis.
    pub const fn unit(self) -> [f32; 3] {
        match self {
            Axis::X => [1.0, 0.0, 0.0],
            Axis::Y => [0.0, 1.0, 0.0],
            Axis::Z => [0.0, 0.0, 1.0],
        }
    }

    /// Pick this axis' component out of a position.
    #[inline]
    pub fn component(self, position: [f32; 3]) -> f32 {
        position[self.index()]
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

/// One of the three planes along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Slice {
    Negative,
    Middle,
    Positive,
}

impl Slice {
    /// All slices from negative to positive.
    pub const ALL: [Self; 3] = [Self::Negative, Self::Middle, Self::Positive];

    /// Grid offset of this slice: -1, 0 or +1.
    pub const fn offset(self) -> i8 {
        match self {
            Slice::Negative => -1,
            Slice::Middle => 0,
            Slice::Positive => 1,
        }
    }

    /// Slice for a grid offset, if the offset is on the grid.
    pub const fn from_offset(offset: i8) -> Option<Self> {
        match offset {
            -1 => Some(Slice::Negative),
            0 => Some(Slice::Middle),
            1 => Some(Slice::Positive),
            _ => None,
        }
    }

    /// World coordinate of this plane at the given spacing.
    pub fn coordinate(self, spacing: f32) -> f32 {
        f32::from(self.offset()) * spacing
    }

    /// Snap a continuous coordinate to the nearest plane.
    ///
    /// Returns `Middle` only when 0 is strictly closest, `Negative` only when
    /// `-spacing` is strictly closest, and `Positive` otherwise. Ties
    /// (including a tie between 0 and `-spacing`) resolve to `Positive`.
    pub fn classify(v: f32, spacing: f32) -> Self {
        let to_zero = v.abs();
        let to_pos = (spacing - v).abs();
        let to_neg = (-spacing - v).abs();

        if to_zero < to_neg && to_zero < to_pos {
            return Slice::Middle;
        }
        if to_neg < to_zero && to_neg < to_pos {
            return Slice::Negative;
        }
        Slice::Positive
    }
}

impl std::fmt::Display for Slice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+}", self.offset())
    }
}

/// Classify at the default cubelet spacing.
#[inline]
pub fn classify(v: f32) -> Slice {
    Slice::classify(v, DEFAULT_SPACING)
}
