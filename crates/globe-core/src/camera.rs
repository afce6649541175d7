//! Camera state machine: free orbit, animated focus on a marker, focused hold
//! and animated return to the default view.
//!
//! Transitions are a pure table ([`transition`]); [`CameraController`] applies
//! them, owns the single in-flight [`Tween`] and pins the look-at target to the
//! globe centre while animating.

use crate::config::GlobeTuning;
use crate::events::{FocusInfo, GlobeEvent};
use crate::markers::{MarkerIndex, MarkerRegistry};
use crate::state::{CameraMode, CameraState};
use crate::tween::{Easing, Tween, TweenToken};
use glam::{Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraCommand {
    /// A marker was resolved under a click.
    Pick(MarkerIndex),
    TweenComplete(TweenToken),
    /// Key press or confirmed prompt asking for the default view.
    Reset,
    /// The user chose to stay after focusing.
    Decline,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Start (or restart) the tween toward a marker. Enters `AnimatingIn`.
    FocusOn(MarkerIndex),
    /// `AnimatingIn` -> `Focused`.
    Arrive,
    /// Start the tween back to the default position. Enters `AnimatingOut`.
    ReturnToDefault,
    /// `Focused` -> `Orbiting` without a tween.
    Release,
    /// `AnimatingOut` -> `Orbiting`.
    Settle,
}

/// The full transition table. `None` means the command is ignored in `mode`.
pub fn transition(
    mode: CameraMode,
    command: CameraCommand,
    active: Option<TweenToken>,
) -> Option<Transition> {
    use CameraCommand as C;
    use CameraMode as M;
    match (mode, command) {
        (M::Orbiting | M::AnimatingIn | M::AnimatingOut, C::Pick(marker)) => {
            Some(Transition::FocusOn(marker))
        }
        (M::AnimatingIn, C::TweenComplete(token)) if active == Some(token) => {
            Some(Transition::Arrive)
        }
        (M::AnimatingOut, C::TweenComplete(token)) if active == Some(token) => {
            Some(Transition::Settle)
        }
        (M::Focused | M::AnimatingIn, C::Reset) => Some(Transition::ReturnToDefault),
        (M::Focused, C::Decline) => Some(Transition::Release),
        _ => None,
    }
}

/// Where the camera parks when focusing a marker at `marker_world`.
#[inline]
pub fn focus_position(marker_world: Vec3, globe_radius: f32, factor: f32) -> Vec3 {
    marker_world.normalize_or_zero() * (globe_radius * factor)
}

#[derive(Clone, Debug)]
pub struct CameraController {
    state: CameraState,
    tween: Option<Tween>,
    focused: Option<MarkerIndex>,
    next_token: u64,
    orbit_guard_until: Option<f64>,
    focus_duration_sec: f64,
    reset_duration_sec: f64,
    focus_distance_factor: f32,
    default_position: Vec3,
    orbit_guard_sec: f64,
}

impl CameraController {
    pub fn new(tuning: &GlobeTuning) -> Self {
        let default_position = Vec3::new(0.0, 0.0, tuning.default_camera_distance);
        let mut state = CameraState::default();
        state.camera.eye = default_position;
        Self {
            state,
            tween: None,
            focused: None,
            next_token: 0,
            orbit_guard_until: None,
            focus_duration_sec: tuning.focus_duration_sec,
            reset_duration_sec: tuning.reset_duration_sec,
            focus_distance_factor: tuning.focus_distance_factor,
            default_position,
            orbit_guard_sec: tuning.orbit_guard_sec,
        }
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut CameraState {
        &mut self.state
    }

    pub fn mode(&self) -> CameraMode {
        self.state.mode
    }

    pub fn tween(&self) -> Option<&Tween> {
        self.tween.as_ref()
    }

    /// Marker targeted by the current or last focus.
    pub fn focused_marker(&self) -> Option<MarkerIndex> {
        self.focused
    }

    pub fn default_position(&self) -> Vec3 {
        self.default_position
    }

    fn guard_active(&self, now_sec: f64) -> bool {
        self.orbit_guard_until.is_some_and(|until| now_sec < until)
    }

    /// Free-orbit input is honored only while orbiting and outside the guard
    /// window that follows a declined reset.
    pub fn orbit_enabled(&self, now_sec: f64) -> bool {
        self.state.mode == CameraMode::Orbiting && !self.guard_active(now_sec)
    }

    pub fn picks_enabled(&self, now_sec: f64) -> bool {
        self.state.mode != CameraMode::Focused && !self.guard_active(now_sec)
    }

    /// Apply `command` at `now_sec`. Returns whether a transition happened.
    pub fn handle(
        &mut self,
        command: CameraCommand,
        now_sec: f64,
        registry: &MarkerRegistry,
        globe_rotation: Quat,
        events: &mut Vec<GlobeEvent>,
    ) -> bool {
        let Some(step) = transition(self.state.mode, command, self.state.active_tween) else {
            log::debug!("[camera] {:?} ignored in {:?}", command, self.state.mode);
            return false;
        };
        match step {
            Transition::FocusOn(marker) => {
                let Some(m) = registry.get(marker) else {
                    log::warn!("[camera] focus on unknown marker {:?}", marker);
                    return false;
                };
                let to = focus_position(
                    m.world_position(globe_rotation),
                    registry.globe_radius(),
                    self.focus_distance_factor,
                );
                log::info!("[camera] focusing {}", m.id());
                self.focused = Some(marker);
                self.start_tween(to, self.focus_duration_sec, now_sec);
                self.state.mode = CameraMode::AnimatingIn;
            }
            Transition::Arrive => {
                self.finish_tween();
                self.state.mode = CameraMode::Focused;
                if let Some(m) = self.focused.and_then(|i| registry.get(i)) {
                    log::info!("[camera] focused {}", m.id());
                    events.push(GlobeEvent::MarkerFocused(FocusInfo::from_marker(m)));
                }
            }
            Transition::ReturnToDefault => {
                log::info!("[camera] returning to default view");
                self.start_tween(self.default_position, self.reset_duration_sec, now_sec);
                self.state.mode = CameraMode::AnimatingOut;
            }
            Transition::Release => {
                self.state.mode = CameraMode::Orbiting;
                self.orbit_guard_until = Some(now_sec + self.orbit_guard_sec);
                log::info!("[camera] staying on marker, orbit resumes shortly");
            }
            Transition::Settle => {
                self.finish_tween();
                self.state.mode = CameraMode::Orbiting;
                self.focused = None;
                events.push(GlobeEvent::ReturnedToDefault);
            }
        }
        true
    }

    /// Sample the active tween at `now_sec`, pin the target, and complete the
    /// tween once its duration has elapsed.
    pub fn advance(
        &mut self,
        now_sec: f64,
        registry: &MarkerRegistry,
        globe_rotation: Quat,
        events: &mut Vec<GlobeEvent>,
    ) {
        let Some(tween) = &self.tween else {
            return;
        };
        let token = tween.token;
        let finished = tween.is_finished(now_sec);
        self.state.camera.eye = tween.sample(now_sec);
        self.state.camera.target = Vec3::ZERO;
        if finished {
            self.handle(
                CameraCommand::TweenComplete(token),
                now_sec,
                registry,
                globe_rotation,
                events,
            );
        }
    }

    /// Replacing the tween discards the previous one outright; its token can
    /// no longer complete anything.
    fn start_tween(&mut self, to: Vec3, duration_sec: f64, now_sec: f64) {
        if let Some(old) = self.tween.take() {
            log::debug!("[camera] cancelling tween {:?}", old.token);
        }
        self.next_token += 1;
        let token = TweenToken(self.next_token);
        self.tween = Some(Tween {
            token,
            from: self.state.camera.eye,
            to,
            start_sec: now_sec,
            duration_sec,
            easing: Easing::CubicInOut,
        });
        self.state.active_tween = Some(token);
        self.state.camera.target = Vec3::ZERO;
        self.orbit_guard_until = None;
    }

    fn finish_tween(&mut self) {
        if let Some(t) = self.tween.take() {
            self.state.camera.eye = t.to;
        }
        self.state.active_tween = None;
        self.state.camera.target = Vec3::ZERO;
    }
}
