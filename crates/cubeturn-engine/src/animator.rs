//! The rotation state machine.
//!
//! ```text
//!            start (guard ok)
//!   Idle ────────────────────► Animating
//!    ▲                             │ tick: angle = ease(progress) × target
//!    └───────── progress ≥ 1 ──────┘ bake + fulfil completion
//! ```
//!
//! There is exactly one animator per cube and at most one rotation in flight.
//! A start while animating is refused, never queued. A rotation always runs
//! to completion once started.

use std::time::Duration;

use cubeturn_geometry::{Axis, Face, Move, Slice};
use glam::{Quat, Vec3};
use serde::Serialize;
use tokio::sync::oneshot;

use crate::cube::{Cube, SliceMask};
use crate::error::Rejection;
use crate::guard;

/// Cubic ease-in-out on `[0, 1]`.
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Handle to a started move, fulfilled when the rotation commits.
#[derive(Debug)]
pub struct MoveTicket {
    requested: Move,
    done: oneshot::Receiver<Move>,
}

impl MoveTicket {
    /// The move that was started.
    pub fn requested(&self) -> Move {
        self.requested
    }

    /// Non-blocking check for completion.
    pub fn try_completed(&mut self) -> Option<Move> {
        self.done.try_recv().ok()
    }

    /// Wait until the rotation has been baked into the cube.
    ///
    /// Returns `None` if the animator was dropped before finishing.
    pub async fn completed(self) -> Option<Move> {
        self.done.await.ok()
    }
}

/// The single in-flight rotation.
#[derive(Debug)]
pub struct ActiveRotation {
    mv: Move,
    axis: Axis,
    slice: Slice,
    members: SliceMask,
    started_at: Duration,
    duration: Duration,
    target_angle: f32,
    angle: f32,
    on_complete: Option<oneshot::Sender<Move>>,
}

impl ActiveRotation {
    pub fn mv(&self) -> Move {
        self.mv
    }

    pub fn members(&self) -> SliceMask {
        self.members
    }

    /// Current interpolated angle in radians.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn target_angle(&self) -> f32 {
        self.target_angle
    }

    /// Linear progress in `[0, 1]` at `now`.
    pub fn progress(&self, now: Duration) -> f32 {
        let elapsed = now.saturating_sub(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// Animator state: one tagged value instead of per-face flags.
#[derive(Debug, Default)]
pub enum AnimatorState {
    #[default]
    Idle,
    Animating(ActiveRotation),
}

impl AnimatorState {
    pub fn is_animating(&self) -> bool {
        matches!(self, AnimatorState::Animating(_))
    }

    /// Face currently turning, if any.
    pub fn active_face(&self) -> Option<Face> {
        self.active().map(|a| a.mv.face)
    }

    pub fn active(&self) -> Option<&ActiveRotation> {
        match self {
            AnimatorState::Animating(active) => Some(active),
            AnimatorState::Idle => None,
        }
    }
}

/// Interpolated rotation of the active slice, for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SliceFrame {
    #[serde(rename = "move")]
    pub mv: Move,
    pub axis: Axis,
    pub slice: Slice,
    pub members: SliceMask,
    /// Current angle in radians; replaces (never accumulates onto) the previous frame.
    pub angle: f32,
    pub progress: f32,
}

impl SliceFrame {
    /// Rotation to pre-multiply onto each member's baked orientation.
    pub fn rotation(&self) -> Quat {
        Quat::from_axis_angle(Vec3::from_array(self.axis.unit()), self.angle)
    }
}

/// Drives one quarter turn at a time.
#[derive(Debug)]
pub struct RotationAnimator {
    state: AnimatorState,
    duration: Duration,
}

impl RotationAnimator {
    /// Create an idle animator with the given per-turn duration.
    pub fn new(duration: Duration) -> Self {
        Self {
            state: AnimatorState::Idle,
            duration,
        }
    }

    pub fn state(&self) -> &AnimatorState {
        &self.state
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating()
    }

    /// Start turning `mv`'s slice at `now`.
    ///
    /// Slice membership is computed fresh from the cube's current
    /// orientations. On refusal nothing changes.
    pub fn start(&mut self, mv: Move, cube: &Cube, now: Duration) -> Result<MoveTicket, Rejection> {
        guard::check(&self.state, mv.face)?;

        let axis = mv.face.axis();
        let slice = mv.face.slice();
        let members = cube.select(axis, slice);
        let (tx, rx) = oneshot::channel();

        tracing::debug!(%mv, %axis, %slice, cubelets = members.len(), "rotation started");

        self.state = AnimatorState::Animating(ActiveRotation {
            mv,
            axis,
            slice,
            members,
            started_at: now,
            duration: self.duration,
            target_angle: mv.angle(),
            angle: 0.0,
            on_complete: Some(tx),
        });

        Ok(MoveTicket {
            requested: mv,
            done: rx,
        })
    }

    /// Advance the in-flight rotation to `now`.
    ///
    /// Returns the move once it has been baked into `cube`.
    pub fn tick(&mut self, now: Duration, cube: &mut Cube) -> Option<Move> {
        let AnimatorState::Animating(active) = &mut self.state else {
            return None;
        };

        let progress = active.progress(now);
        active.angle = ease_in_out_cubic(progress) * active.target_angle;
        if now.saturating_sub(active.started_at) < active.duration {
            return None;
        }

        let AnimatorState::Animating(done) = std::mem::take(&mut self.state) else {
            return None;
        };
        cube.bake(done.members, done.axis, done.target_angle);
        if let Some(tx) = done.on_complete {
            // The caller may have dropped its ticket
            let _ = tx.send(done.mv);
        }

        tracing::debug!(mv = %done.mv, "rotation committed");
        Some(done.mv)
    }

    /// Renderer view of the in-flight rotation.
    pub fn frame(&self, now: Duration) -> Option<SliceFrame> {
        self.state.active().map(|active| SliceFrame {
            mv: active.mv,
            axis: active.axis,
            slice: active.slice,
            members: active.members,
            angle: active.angle,
            progress: active.progress(now),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubeturn_geometry::{GridCoord, QUARTER_TURN};

    const TURN: Duration = Duration::from_millis(300);

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn easing_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-6);
        assert!((ease_in_out_cubic(0.25) - 0.0625).abs() < 1e-6);
        assert!((ease_in_out_cubic(0.75) - 0.9375).abs() < 1e-6);
    }

    #[test]
    fn easing_is_monotonic() {
        let mut last = 0.0;
        for i in 0..=100 {
            let v = ease_in_out_cubic(i as f32 / 100.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn start_enters_animating() {
        let cube = Cube::default();
        let mut animator = RotationAnimator::new(TURN);
        let ticket = animator.start(Move::forward(Face::R), &cube, ms(0)).unwrap();

        assert_eq!(ticket.requested(), Move::forward(Face::R));
        assert!(animator.is_animating());
        let active = animator.state().active().unwrap();
        assert_eq!(active.members().len(), 9);
        assert_eq!(active.target_angle(), -QUARTER_TURN);
    }

    #[test]
    fn busy_start_leaves_state_alone() {
        let cube = Cube::default();
        let mut animator = RotationAnimator::new(TURN);
        animator.start(Move::forward(Face::R), &cube, ms(0)).unwrap();

        assert!(animator.start(Move::forward(Face::L), &cube, ms(10)).is_err());
        assert!(animator.start(Move::forward(Face::U), &cube, ms(10)).is_err());
        assert_eq!(animator.state().active_face(), Some(Face::R));
    }

    #[test]
    fn tick_replaces_angle_each_frame() {
        let mut cube = Cube::default();
        let mut animator = RotationAnimator::new(TURN);
        animator.start(Move::forward(Face::U), &cube, ms(0)).unwrap();

        assert_eq!(animator.tick(ms(150), &mut cube), None);
        let halfway = animator.frame(ms(150)).unwrap();
        assert!((halfway.angle - (-QUARTER_TURN / 2.0)).abs() < 1e-5);
        assert!((halfway.progress - 0.5).abs() < 1e-6);

        // Revisiting an earlier time yields the earlier angle, not a sum
        animator.tick(ms(75), &mut cube);
        let earlier = animator.frame(ms(75)).unwrap();
        assert!(earlier.angle.abs() < halfway.angle.abs());

        // Cube is untouched until commit
        assert!(cube.is_solved());
    }

    #[test]
    fn completion_bakes_and_returns_idle() {
        let mut cube = Cube::default();
        let mut animator = RotationAnimator::new(TURN);
        let mut ticket = animator.start(Move::forward(Face::F), &cube, ms(0)).unwrap();
        assert_eq!(ticket.try_completed(), None);

        assert_eq!(animator.tick(ms(300), &mut cube), Some(Move::forward(Face::F)));
        assert!(!animator.is_animating());
        assert!(animator.frame(ms(300)).is_none());
        assert_eq!(ticket.try_completed(), Some(Move::forward(Face::F)));

        // Top-front edge moved off the top layer
        let edge = GridCoord::new(0, 1, 1).index();
        assert_ne!(cube.slice_of(edge, Axis::Y), Slice::Positive);

        // Further ticks are no-ops
        assert_eq!(animator.tick(ms(400), &mut cube), None);
    }

    #[test]
    fn frame_rotation_matches_angle() {
        let cube = Cube::default();
        let mut animator = RotationAnimator::new(TURN);
        animator.start(Move::reversed(Face::B), &cube, ms(0)).unwrap();
        let frame = animator.frame(ms(0)).unwrap();
        assert_eq!(frame.angle, 0.0);
        assert!(frame.rotation().abs_diff_eq(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn completed_future_resolves() {
        let mut cube = Cube::default();
        let mut animator = RotationAnimator::new(TURN);
        let ticket = animator.start(Move::forward(Face::M), &cube, ms(0)).unwrap();
        animator.tick(ms(300), &mut cube);

        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        assert_eq!(rt.block_on(ticket.completed()), Some(Move::forward(Face::M)));
    }
}
