//! Mutual exclusion between conflicting moves.
//!
//! Faces are grouped by axis: X = {R, L, M}, Y = {U, D}, Z = {F, B}. A move
//! may not start while a face of a different group is turning. Same-group
//! overlap is prevented separately by the animator's single in-flight slot.

use cubeturn_geometry::Face;

use crate::animator::AnimatorState;
use crate::error::{BusyReason, Rejection};

/// Whether `face` may start given the current animator state.
///
/// Only the axis-group rule is applied here.
pub fn can_start(state: &AnimatorState, face: Face) -> bool {
    match state.active_face() {
        Some(active) => !active.conflicts_with(face),
        None => true,
    }
}

/// Full admission check: axis groups first, then the single-rotation lock.
pub fn check(state: &AnimatorState, face: Face) -> Result<(), Rejection> {
    let Some(active) = state.active_face() else {
        return Ok(());
    };
    let reason = if can_start(state, face) {
        BusyReason::SliceLocked
    } else {
        BusyReason::AxisConflict
    };
    Err(Rejection::Busy { active, reason })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animator::RotationAnimator;
    use crate::cube::Cube;
    use cubeturn_geometry::Move;
    use std::time::Duration;

    fn animating(face: Face) -> RotationAnimator {
        let cube = Cube::default();
        let mut animator = RotationAnimator::new(Duration::from_millis(300));
        animator
            .start(Move::forward(face), &cube, Duration::ZERO)
            .unwrap();
        animator
    }

    #[test]
    fn idle_admits_everything() {
        for face in Face::ALL {
            assert!(can_start(&AnimatorState::Idle, face));
            assert!(check(&AnimatorState::Idle, face).is_ok());
        }
    }

    #[test]
    fn other_axis_group_conflicts() {
        let animator = animating(Face::R);
        for face in [Face::U, Face::D, Face::F, Face::B] {
            assert!(!can_start(animator.state(), face));
            assert_eq!(
                check(animator.state(), face),
                Err(Rejection::Busy { active: Face::R, reason: BusyReason::AxisConflict })
            );
        }
    }

    #[test]
    fn same_axis_group_passes_predicate_but_is_locked() {
        let animator = animating(Face::R);
        for face in [Face::L, Face::M, Face::R] {
            assert!(can_start(animator.state(), face));
            assert_eq!(
                check(animator.state(), face),
                Err(Rejection::Busy { active: Face::R, reason: BusyReason::SliceLocked })
            );
        }
    }
}
