//! Cubelet arena and slice selection.
//!
//! The cube is a flat array of 27 cubelet records indexed by home position.
//! A turn never moves records around: it selects the indices currently in a
//! slice, rotates only those, and bakes the final rotation into each
//! selected record's orientation.

use cubeturn_geometry::{Axis, GridCoord, Slice, CUBELET_COUNT};
use glam::{Quat, Vec3};
use serde::Serialize;

/// One of the 27 cubelets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cubelet {
    home: GridCoord,
    orientation: Quat,
}

impl Cubelet {
    fn new(home: GridCoord) -> Self {
        Self {
            home,
            orientation: Quat::IDENTITY,
        }
    }

    /// Identity of this cubelet: where it sits on a solved cube.
    pub fn home(&self) -> GridCoord {
        self.home
    }

    /// Baked orientation relative to the solved cube.
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Position in the cube's own frame.
    pub fn local_position(&self, spacing: f32) -> Vec3 {
        self.orientation * Vec3::from_array(self.home.to_position(spacing))
    }
}

/// A set of cubelet indices, one bit per arena slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SliceMask(u32);

impl SliceMask {
    pub const EMPTY: Self = Self(0);

    /// Add an arena index.
    pub fn insert(&mut self, index: usize) {
        debug_assert!(index < CUBELET_COUNT);
        self.0 |= 1 << index;
    }

    pub fn contains(&self, index: usize) -> bool {
        index < CUBELET_COUNT && self.0 & (1 << index) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Member indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..CUBELET_COUNT).filter(move |&i| self.contains(i))
    }
}

/// The 27-cubelet arena.
#[derive(Debug, Clone)]
pub struct Cube {
    cubelets: [Cubelet; CUBELET_COUNT],
    spacing: f32,
    ambient: Quat,
}

impl Cube {
    /// A solved cube at the given cubelet spacing.
    pub fn new(spacing: f32) -> Self {
        let mut cubelets = [Cubelet::new(GridCoord::ORIGIN); CUBELET_COUNT];
        for home in GridCoord::all() {
            cubelets[home.index()] = Cubelet::new(home);
        }
        Self {
            cubelets,
            spacing,
            ambient: Quat::IDENTITY,
        }
    }

    pub fn cubelets(&self) -> &[Cubelet] {
        &self.cubelets
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Cosmetic whole-cube rotation applied by the presentation layer.
    pub fn ambient(&self) -> Quat {
        self.ambient
    }

    pub fn set_ambient(&mut self, ambient: Quat) {
        self.ambient = ambient.normalize();
    }

    /// Position of a cubelet after the ambient rotation.
    pub fn world_position(&self, index: usize) -> Vec3 {
        self.ambient * self.cubelets[index].local_position(self.spacing)
    }

    /// Slice a cubelet currently occupies along an axis.
    ///
    /// Evaluated in the cube's own frame, so ambient rotation never changes
    /// membership.
    pub fn slice_of(&self, index: usize, axis: Axis) -> Slice {
        let position = self.cubelets[index].local_position(self.spacing);
        Slice::classify(axis.component(position.to_array()), self.spacing)
    }

    /// Every cubelet currently in `slice` along `axis`.
    pub fn select(&self, axis: Axis, slice: Slice) -> SliceMask {
        let mut mask = SliceMask::EMPTY;
        for index in 0..CUBELET_COUNT {
            if self.slice_of(index, axis) == slice {
                mask.insert(index);
            }
        }
        mask
    }

    /// Rotate the selected cubelets by `angle` about `axis` and keep the result.
    pub fn bake(&mut self, mask: SliceMask, axis: Axis, angle: f32) {
        let rotation = Quat::from_axis_angle(Vec3::from_array(axis.unit()), angle);
        for index in mask.iter() {
            let cubelet = &mut self.cubelets[index];
            cubelet.orientation = snap_orientation(rotation * cubelet.orientation);
        }
    }

    /// Return every cubelet to its solved orientation.
    pub fn reset(&mut self) {
        for cubelet in &mut self.cubelets {
            cubelet.orientation = Quat::IDENTITY;
        }
    }

    /// Whether every cubelet is back at its home orientation.
    pub fn is_solved(&self) -> bool {
        // q and -q are the same rotation
        self.cubelets.iter().all(|c| {
            c.orientation.abs_diff_eq(Quat::IDENTITY, 1e-4)
                || c.orientation.abs_diff_eq(-Quat::IDENTITY, 1e-4)
        })
    }
}

impl Default for Cube {
    fn default() -> Self {
        Self::new(cubeturn_geometry::DEFAULT_SPACING)
    }
}

/// Snap a quaternion to the nearest member of the 24-element cube rotation group.
///
/// Every component of those rotations is one of 0, ±1/2, ±1/√2 or ±1, so
/// per-component snapping removes accumulated drift after each quarter turn.
fn snap_orientation(q: Quat) -> Quat {
    const LEVELS: [f32; 4] = [0.0, 0.5, std::f32::consts::FRAC_1_SQRT_2, 1.0];

    let snap = |c: f32| {
        let magnitude = LEVELS
            .iter()
            .copied()
            .min_by(|a, b| (a - c.abs()).abs().total_cmp(&(b - c.abs()).abs()))
            .unwrap_or(0.0);
        magnitude.copysign(c)
    };

    let snapped = Quat::from_xyzw(snap(q.x), snap(q.y), snap(q.z), snap(q.w));
    if snapped.length_squared() > 0.0 {
        snapped.normalize()
    } else {
        q.normalize()
    }
}
