//! The cube controller: one cube, one animator, one timeline.
//!
//! All work happens on a single cooperative timeline. Callers submit input
//! and advance time with [`CubeController::tick`]; completions, history
//! bookkeeping, display expiry and scripted playback all happen inside the
//! tick. Cubelet transforms are written only by the animator's commit or by
//! a reset while idle.

use std::collections::VecDeque;
use std::time::Duration;

use cubeturn_geometry::{expand_solution, parse_play_tokens, Move, PlayToken};

use crate::animator::{MoveTicket, RotationAnimator, SliceFrame};
use crate::autoplay::{AutoPlaySequencer, Cue, PlaybackStatus};
use crate::config::EngineConfig;
use crate::cube::Cube;
use crate::error::{BusyReason, Result, Rejection};
use crate::events::{CubeEvent, CubeState, CubeletTransform};
use crate::history::MoveHistory;
use crate::persistence::SessionStore;
use crate::scheduler::{InputScheduler, InputToken};

/// Who asked for the in-flight rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Manual,
    Undo,
    Scripted,
}

/// What a manual input did.
#[derive(Debug)]
pub enum InputOutcome {
    /// A face started turning.
    Turn(MoveTicket),
    /// Reverse mode was set.
    Direction { reverse: bool },
    /// The inverse of the last move started turning.
    Undo(MoveTicket),
}

#[derive(Debug, Clone)]
struct TransientLabel {
    label: String,
    expires_at: Duration,
}

/// Facade over the animator, guard, history, input scheduler and sequencer.
pub struct CubeController {
    config: EngineConfig,
    cube: Cube,
    animator: RotationAnimator,
    history: MoveHistory,
    scheduler: InputScheduler,
    sequencer: AutoPlaySequencer,
    reverse: bool,
    autosolve: bool,
    in_flight: Option<Origin>,
    display: Option<TransientLabel>,
    now: Duration,
    events: VecDeque<CubeEvent>,
    store: Option<Box<dyn SessionStore>>,
}

impl CubeController {
    /// Create a controller with a solved cube and empty history.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            cube: Cube::new(config.spacing),
            animator: RotationAnimator::new(config.turn_duration),
            history: MoveHistory::new(config.history_limit),
            scheduler: InputScheduler::new(config.cooldown),
            sequencer: AutoPlaySequencer::new(config.single_turn_delay, config.double_turn_delay),
            reverse: false,
            autosolve: false,
            in_flight: None,
            display: None,
            now: Duration::ZERO,
            events: VecDeque::new(),
            store: None,
            config,
        })
    }

    /// Create a controller whose history is restored from and saved to `store`.
    pub fn with_store(config: EngineConfig, store: Box<dyn SessionStore>) -> Result<Self> {
        let mut controller = Self::new(config)?;
        let tokens = store.load()?;
        controller.history = MoveHistory::from_tokens(tokens, controller.config.history_limit);
        tracing::info!(depth = controller.history.len(), "restored move history");
        controller.store = Some(store);
        Ok(controller)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Time elapsed on the controller's timeline.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    /// Reorient the whole cube; slice selection is unaffected.
    pub fn set_ambient(&mut self, ambient: glam::Quat) {
        self.cube.set_ambient(ambient);
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn reverse_mode(&self) -> bool {
        self.reverse
    }

    pub fn is_autosolving(&self) -> bool {
        self.autosolve
    }

    /// Submit a face move in notation (`R`, `R'`).
    ///
    /// A bare letter turns in the current direction; an apostrophe inverts it.
    pub fn submit_move(&mut self, token: &str) -> std::result::Result<MoveTicket, Rejection> {
        let typed = Move::parse(token)
            .map_err(|e| self.reject(Rejection::invalid_notation(token, &e)))?;
        self.manual_turn(typed)
    }

    /// Handle any manual input token: a move, `1`/`2` for direction, or `undo`.
    pub fn handle_input(&mut self, raw: &str) -> std::result::Result<InputOutcome, Rejection> {
        let token = InputToken::parse(raw).map_err(|r| self.reject(r))?;
        match token {
            InputToken::Turn(typed) => self.manual_turn(typed).map(InputOutcome::Turn),
            InputToken::Direction { reverse } => {
                self.set_reverse(reverse)?;
                Ok(InputOutcome::Direction { reverse })
            }
            InputToken::Undo => self.undo().map(InputOutcome::Undo),
        }
    }

    /// Manually select forward (`false`) or reverse (`true`).
    pub fn set_reverse(&mut self, reverse: bool) -> std::result::Result<(), Rejection> {
        let token = InputToken::Direction { reverse };
        self.scheduler
            .admit(&token, self.now, self.autosolve)
            .map_err(|r| self.reject(r))?;
        self.apply_reverse(reverse);
        Ok(())
    }

    /// Flip the current direction.
    pub fn toggle_reverse(&mut self) -> std::result::Result<bool, Rejection> {
        let reverse = !self.reverse;
        self.set_reverse(reverse)?;
        Ok(reverse)
    }

    /// Undo the most recent recorded move by turning its inverse.
    ///
    /// The inverse is not recorded, so undo cannot itself be undone.
    pub fn undo(&mut self) -> std::result::Result<MoveTicket, Rejection> {
        self.scheduler
            .admit(&InputToken::Undo, self.now, self.autosolve)
            .map_err(|r| self.reject(r))?;
        let Some(last) = self.history.last() else {
            return Err(self.reject(Rejection::EmptyHistory));
        };

        let ticket = self.start(last.inverse(), Origin::Undo)?;
        self.history.pop();
        self.persist();
        Ok(ticket)
    }

    /// Return every cubelet to its solved orientation and clear history.
    ///
    /// Refused while a rotation is in flight. Cancels any scripted playback.
    pub fn reset(&mut self) -> std::result::Result<(), Rejection> {
        if let Some(active) = self.animator.state().active_face() {
            return Err(self.reject(Rejection::Busy {
                active,
                reason: BusyReason::NotIdle,
            }));
        }
        if self.autosolve {
            self.stop_autosolve(true);
        }
        self.cube.reset();
        self.history.clear();
        self.persist();
        tracing::info!("cube reset");
        self.events.push_back(CubeEvent::CubeReset);
        Ok(())
    }

    /// Snapshot for callers and the network layer.
    pub fn query_state(&self) -> CubeState {
        CubeState {
            is_animating: self.animator.is_animating(),
            reverse_mode: self.reverse,
            history_depth: self.history.len(),
            autosolve: self.autosolve,
            active_move: self.animator.state().active().map(|a| a.mv()),
            display: self.display.as_ref().map(|d| d.label.clone()),
            is_solved: self.cube.is_solved() && !self.animator.is_animating(),
        }
    }

    /// Start replaying primitive tokens under programmatic control.
    ///
    /// Manual input is locked until the list is exhausted or cancelled.
    /// Scripted turns are not recorded, so undo history is left as it was.
    pub fn start_autosolve(
        &mut self,
        tokens: Vec<PlayToken>,
    ) -> std::result::Result<(), Rejection> {
        if self.autosolve {
            return Err(self.reject(Rejection::LockedMode));
        }
        if let Some(active) = self.animator.state().active_face() {
            return Err(self.reject(Rejection::Busy {
                active,
                reason: BusyReason::NotIdle,
            }));
        }

        self.autosolve = true;
        self.apply_reverse(false);

        self.sequencer.start(tokens, self.now);
        let status = PlaybackStatus::from(&self.sequencer);
        tracing::info!(
            tokens = status.total_tokens,
            moves = status.logical_moves,
            "autosolve started"
        );
        self.events.push_back(CubeEvent::AutoSolveStarted {
            tokens: status.total_tokens,
            moves: status.logical_moves,
        });

        self.pump_autoplay();
        Ok(())
    }

    /// Expand standard solver notation (`R' D2 U`) and replay it.
    pub fn start_solution(&mut self, solution: &str) -> std::result::Result<(), Rejection> {
        let tokens = expand_solution(solution)
            .map_err(|e| self.reject(Rejection::invalid_notation(solution, &e)))?;
        self.start_autosolve(tokens)
    }

    /// Replay an already expanded primitive token list (`["2", "R", "1"]`).
    pub fn start_play_tokens<I, S>(&mut self, tokens: I) -> std::result::Result<(), Rejection>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let raw: Vec<S> = tokens.into_iter().collect();
        let parsed = parse_play_tokens(raw.iter().map(|t| t.as_ref())).map_err(|e| {
            let joined: Vec<&str> = raw.iter().map(|t| t.as_ref()).collect();
            self.reject(Rejection::invalid_notation(&joined.join(" "), &e))
        })?;
        self.start_autosolve(parsed)
    }

    /// Stop scripted playback after the in-flight turn. Returns whether it was running.
    pub fn cancel_autosolve(&mut self) -> bool {
        if !self.autosolve {
            return false;
        }
        self.stop_autosolve(true);
        true
    }

    pub fn autoplay_status(&self) -> PlaybackStatus {
        PlaybackStatus::from(&self.sequencer)
    }

    /// Advance the timeline by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.now += dt;

        if let Some(mv) = self.animator.tick(self.now, &mut self.cube) {
            self.on_committed(mv);
        }

        if self.display.as_ref().is_some_and(|d| self.now >= d.expires_at) {
            self.display = None;
            self.events.push_back(CubeEvent::DisplayCleared);
        }

        self.pump_autoplay();
    }

    /// Interpolated rotation of the active slice, if any.
    pub fn frame(&self) -> Option<SliceFrame> {
        self.animator.frame(self.now)
    }

    /// Render transforms for all 27 cubelets, including the in-flight rotation.
    pub fn cubelet_transforms(&self) -> Vec<CubeletTransform> {
        let frame = self.frame();
        let spacing = self.cube.spacing();
        self.cube
            .cubelets()
            .iter()
            .enumerate()
            .map(|(index, cubelet)| {
                let live = match &frame {
                    Some(f) if f.members.contains(index) => f.rotation(),
                    _ => glam::Quat::IDENTITY,
                };
                CubeletTransform {
                    home: cubelet.home(),
                    orientation: (live * cubelet.orientation()).to_array(),
                    position: (live * cubelet.local_position(spacing)).to_array(),
                }
            })
            .collect()
    }

    /// Take every event produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<CubeEvent> {
        self.events.drain(..).collect()
    }

    fn manual_turn(&mut self, typed: Move) -> std::result::Result<MoveTicket, Rejection> {
        self.scheduler
            .admit(&InputToken::Turn(typed), self.now, self.autosolve)
            .map_err(|r| self.reject(r))?;

        let mv = Move::new(typed.face, typed.reverse != self.reverse);
        let ticket = self.start(mv, Origin::Manual)?;
        self.scheduler.mark_accepted(self.now);
        Ok(ticket)
    }

    fn start(&mut self, mv: Move, origin: Origin) -> std::result::Result<MoveTicket, Rejection> {
        let ticket = self
            .animator
            .start(mv, &self.cube, self.now)
            .map_err(|r| self.reject(r))?;

        self.in_flight = Some(origin);
        if let Some(active) = self.animator.state().active() {
            self.events.push_back(CubeEvent::MoveStarted {
                mv,
                axis: mv.face.axis(),
                slice: mv.face.slice(),
                cubelets: active.members().len(),
            });
        }
        Ok(ticket)
    }

    fn on_committed(&mut self, mv: Move) {
        self.events.push_back(CubeEvent::MoveCompleted { mv });
        match self.in_flight.take() {
            Some(Origin::Manual) => {
                if let Some(evicted) = self.history.record(mv) {
                    tracing::debug!(%evicted, "history full, dropped oldest move");
                }
                self.persist();
                self.show(mv.notation());
            }
            Some(Origin::Undo) | Some(Origin::Scripted) | None => {}
        }
    }

    fn pump_autoplay(&mut self) {
        if !self.autosolve {
            return;
        }
        while let Some(cue) = self.sequencer.poll(self.now) {
            match cue {
                Cue::Direction { reverse } => {
                    self.apply_reverse(reverse);
                    self.sequencer.advance(self.now);
                }
                Cue::Turn(face) => {
                    let mv = Move::new(face, self.reverse);
                    if self.animator.is_animating() {
                        // Hold the token until the in-flight turn commits
                        break;
                    }
                    if self.start(mv, Origin::Scripted).is_err() {
                        break;
                    }
                    if let Some(label) = self.sequencer.advance(self.now) {
                        self.show(label.text.clone());
                        self.events.push_back(CubeEvent::AutoSolveLabel(label));
                    }
                }
                Cue::Finished => {
                    self.sequencer.finish();
                    self.stop_autosolve(false);
                    break;
                }
            }
        }
    }

    fn stop_autosolve(&mut self, cancelled: bool) {
        if cancelled {
            self.sequencer.cancel();
        }
        // A cancel can land between a `2` token and its closing `1`
        self.apply_reverse(false);
        self.autosolve = false;
        tracing::info!(cancelled, "autosolve finished");
        self.events.push_back(CubeEvent::AutoSolveFinished { cancelled });
    }

    fn apply_reverse(&mut self, reverse: bool) {
        if self.reverse != reverse {
            self.reverse = reverse;
            self.events.push_back(CubeEvent::DirectionChanged { reverse });
        }
    }

    fn show(&mut self, label: String) {
        self.display = Some(TransientLabel {
            label: label.clone(),
            expires_at: self.now + self.config.display_duration,
        });
        self.events.push_back(CubeEvent::MoveDisplayed { label });
    }

    fn reject(&mut self, rejection: Rejection) -> Rejection {
        if rejection.is_user_visible() {
            tracing::warn!(%rejection, "input rejected");
            self.events.push_back(CubeEvent::Notice {
                message: rejection.to_string(),
                rejection: rejection.clone(),
            });
        } else {
            tracing::debug!(%rejection, "input rejected");
        }
        rejection
    }

    fn persist(&self) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save(&self.history.to_tokens()) {
                tracing::warn!(error = %e, "failed to save move history");
            }
        }
    }
}

impl std::fmt::Debug for CubeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CubeController")
            .field("now", &self.now)
            .field("animator", &self.animator)
            .field("history", &self.history)
            .field("reverse", &self.reverse)
            .field("autosolve", &self.autosolve)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::persistence::JsonFileStore;
    use cubeturn_geometry::Face;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn controller() -> CubeController {
        CubeController::new(EngineConfig::default()).unwrap()
    }

    /// Submit and run one move to completion, past the cooldown.
    fn play(c: &mut CubeController, token: &str) {
        c.submit_move(token).unwrap();
        c.tick(c.config().turn_duration);
    }

    #[test]
    fn busy_submit_changes_nothing() {
        let mut c = controller();
        c.submit_move("R").unwrap();
        c.tick(ms(100));
        let before = c.query_state();
        let transforms = c.cubelet_transforms();
        let frame = c.frame();

        let err = c.submit_move("U").unwrap_err();
        assert_eq!(
            err,
            Rejection::Busy {
                active: Face::R,
                reason: BusyReason::AxisConflict
            }
        );
        assert_eq!(c.query_state(), before);
        assert_eq!(c.cubelet_transforms(), transforms);
        assert_eq!(c.frame(), frame);
        assert_eq!(c.history().len(), 0);
    }

    #[test]
    fn same_axis_waits_for_idle() {
        let mut c = controller();
        c.submit_move("R").unwrap();
        c.tick(ms(100));
        assert!(matches!(
            c.submit_move("L"),
            Err(Rejection::Busy {
                reason: BusyReason::SliceLocked,
                ..
            })
        ));

        c.tick(ms(200));
        assert!(!c.is_animating());
        let ticket = c.submit_move("L").unwrap();
        assert_eq!(ticket.requested(), Move::forward(Face::L));
    }

    #[test]
    fn undo_turns_inverse_and_pops() {
        let mut c = controller();
        for token in ["R", "U", "F"] {
            play(&mut c, token);
        }
        assert_eq!(c.history().to_tokens(), vec!["R", "U", "F"]);

        let ticket = c.undo().unwrap();
        assert_eq!(ticket.requested(), Move::reversed(Face::F));
        c.tick(ms(300));
        assert_eq!(c.history().to_tokens(), vec!["R", "U"]);

        c.undo().unwrap();
        c.tick(ms(300));
        c.undo().unwrap();
        c.tick(ms(300));
        assert!(c.history().is_empty());
        assert!(c.query_state().is_solved);
        assert_eq!(c.undo().unwrap_err(), Rejection::EmptyHistory);
    }

    #[test]
    fn undo_while_busy_keeps_history() {
        let mut c = controller();
        play(&mut c, "R");
        c.submit_move("U").unwrap();
        assert!(matches!(c.undo(), Err(Rejection::Busy { .. })));
        c.tick(ms(300));
        assert_eq!(c.history().to_tokens(), vec!["R", "U"]);
    }

    #[test]
    fn cooldown_window() {
        let config = EngineConfig {
            turn_duration: ms(100),
            ..EngineConfig::default()
        };
        let mut c = CubeController::new(config).unwrap();

        c.submit_move("R").unwrap();
        c.tick(ms(50));
        assert_eq!(
            c.submit_move("L").unwrap_err(),
            Rejection::Cooldown { remaining: ms(50) }
        );
        c.tick(ms(100));
        assert!(!c.is_animating());
        assert!(c.submit_move("L").is_ok());
    }

    #[test]
    fn reverse_mode_flips_typed_direction() {
        let mut c = controller();
        assert!(matches!(
            c.handle_input("2"),
            Ok(InputOutcome::Direction { reverse: true })
        ));
        assert_eq!(c.submit_move("R").unwrap().requested(), Move::reversed(Face::R));
        c.tick(ms(300));
        assert_eq!(c.submit_move("R'").unwrap().requested(), Move::forward(Face::R));
        c.tick(ms(300));
        assert_eq!(c.history().to_tokens(), vec!["R'", "R"]);
        assert!(c.query_state().is_solved);

        let events = c.drain_events();
        assert_eq!(events[0], CubeEvent::DirectionChanged { reverse: true });
    }

    #[test]
    fn history_is_capped() {
        let mut c = controller();
        for i in 0..12 {
            play(&mut c, if i % 2 == 0 { "R" } else { "U" });
        }
        assert_eq!(c.history().len(), 10);
    }

    #[test]
    fn display_expires() {
        let mut c = controller();
        play(&mut c, "M'");
        assert_eq!(c.query_state().display.as_deref(), Some("M'"));
        c.tick(ms(699));
        assert!(c.query_state().display.is_some());
        c.tick(ms(1));
        assert_eq!(c.query_state().display, None);
        assert!(c.drain_events().contains(&CubeEvent::DisplayCleared));
    }

    #[test]
    fn invalid_notation_is_a_notice() {
        let mut c = controller();
        assert!(matches!(
            c.submit_move("Q"),
            Err(Rejection::InvalidNotation { .. })
        ));
        assert!(matches!(c.drain_events().as_slice(), [CubeEvent::Notice { .. }]));
    }

    #[test]
    fn autosolve_double_turn_timing() {
        let mut c = controller();
        c.start_autosolve(parse_play_tokens(["R", "R"]).unwrap()).unwrap();
        assert_eq!(c.query_state().active_move, Some(Move::forward(Face::R)));

        // First half commits at 300, second half starts on the same tick
        c.tick(ms(300));
        assert!(c.is_animating());
        c.tick(ms(300));
        assert!(!c.is_animating());
        assert!(c.is_autosolving());

        c.tick(ms(200));
        assert!(!c.is_autosolving());

        let labels: Vec<_> = c
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                CubeEvent::AutoSolveLabel(label) => Some(label.text),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["R2"]);
        assert!(c.history().is_empty());
    }

    #[test]
    fn solution_matches_manual_moves() {
        let mut scripted = controller();
        scripted.start_solution("R' D2").unwrap();
        for _ in 0..40 {
            scripted.tick(ms(100));
        }
        assert!(!scripted.is_autosolving());
        assert!(!scripted.reverse_mode());

        let mut manual = controller();
        for token in ["R'", "D", "D"] {
            play(&mut manual, token);
        }
        assert_eq!(scripted.cube().cubelets(), manual.cube().cubelets());
    }

    #[test]
    fn autosolve_locks_manual_input() {
        let mut c = controller();
        play(&mut c, "F");
        c.start_solution("R U").unwrap();

        assert_eq!(c.submit_move("F").unwrap_err(), Rejection::LockedMode);
        assert_eq!(c.handle_input("1").unwrap_err(), Rejection::LockedMode);
        assert_eq!(c.undo().unwrap_err(), Rejection::LockedMode);
        assert_eq!(c.start_solution("B").unwrap_err(), Rejection::LockedMode);

        assert!(c.cancel_autosolve());
        assert!(!c.cancel_autosolve());
        c.tick(ms(300));
        assert!(c.submit_move("F").is_ok());
    }

    #[test]
    fn history_survives_autosolve() {
        let mut c = controller();
        play(&mut c, "R");
        c.start_solution("U D2").unwrap();
        assert_eq!(c.history().to_tokens(), vec!["R"]);

        for _ in 0..30 {
            c.tick(ms(100));
        }
        assert!(!c.is_autosolving());
        assert_eq!(c.history().to_tokens(), vec!["R"]);
        assert_eq!(c.undo().unwrap().requested(), Move::reversed(Face::R));
    }

    #[test]
    fn cancel_restores_forward_direction() {
        let mut c = controller();
        c.start_play_tokens(["2", "R", "1", "U"]).unwrap();
        assert!(c.reverse_mode());

        assert!(c.cancel_autosolve());
        assert!(!c.reverse_mode());
        assert!(c
            .drain_events()
            .contains(&CubeEvent::DirectionChanged { reverse: false }));

        c.tick(ms(300));
        assert_eq!(c.submit_move("F").unwrap().requested(), Move::forward(Face::F));
    }

    #[test]
    fn bad_solution_is_rejected() {
        let mut c = controller();
        assert!(matches!(
            c.start_solution("R Q2"),
            Err(Rejection::InvalidNotation { .. })
        ));
        assert!(!c.is_autosolving());
    }

    #[test]
    fn play_tokens_are_parsed() {
        let mut c = controller();
        assert!(matches!(
            c.start_play_tokens(["R", "x"]),
            Err(Rejection::InvalidNotation { .. })
        ));
        c.start_play_tokens(["2", "F", "1"]).unwrap();
        assert_eq!(c.query_state().active_move, Some(Move::reversed(Face::F)));
    }

    #[test]
    fn reset_requires_idle() {
        let mut c = controller();
        play(&mut c, "R");
        c.submit_move("U").unwrap();
        assert!(matches!(
            c.reset(),
            Err(Rejection::Busy {
                reason: BusyReason::NotIdle,
                ..
            })
        ));
        c.tick(ms(300));
        c.reset().unwrap();
        assert!(c.query_state().is_solved);
        assert!(c.history().is_empty());
    }

    #[test]
    fn transforms_follow_live_rotation() {
        let mut c = controller();
        c.submit_move("U").unwrap();
        c.tick(ms(150));
        let transforms = c.cubelet_transforms();
        assert_eq!(transforms.len(), 27);

        let frame = c.frame().unwrap();
        let moving = transforms
            .iter()
            .enumerate()
            .filter(|(i, t)| frame.members.contains(*i) && t.orientation != [0.0, 0.0, 0.0, 1.0])
            .count();
        assert_eq!(moving, 9);
    }

    #[test]
    fn history_persists_across_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, r#"["R","U'"]"#).unwrap();

        let store = Box::new(JsonFileStore::new(&path));
        let mut c = CubeController::with_store(EngineConfig::default(), store).unwrap();
        assert_eq!(c.history().to_tokens(), vec!["R", "U'"]);

        c.undo().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), r#"["R"]"#);
        c.tick(ms(300));
        play(&mut c, "B");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), r#"["R","B"]"#);
    }

    #[test]
    fn invalid_config_is_refused() {
        let config = EngineConfig {
            history_limit: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(CubeController::new(config), Err(Error::Config { .. })));
    }

    #[tokio::test]
    async fn ticket_resolves_on_commit() {
        let mut c = controller();
        let ticket = c.submit_move("B'").unwrap();
        c.tick(ms(300));
        assert_eq!(ticket.completed().await, Some(Move::reversed(Face::B)));
    }
}
