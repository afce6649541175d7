//! The per-frame driver and the session context that owns all mutable state.
//!
//! Input handlers only enqueue [`InputEvent`]s; [`GlobeSession::tick`] applies
//! them first and then runs the fixed update order: orbit damping, camera
//! tween, marker animation, lights, render.

use crate::camera::{CameraCommand, CameraController};
use crate::config::{GlobeConfig, GlobeTuning, MarkerSpec};
use crate::constants::ATMOSPHERE_SCALE;
use crate::error::Result;
use crate::events::{CursorStyle, GlobeEvent};
use crate::grid::GlobeGrid;
use crate::input::{key_command, InputEvent, KeyCommand};
use crate::lights::LightRig;
use crate::markers::{MarkerIndex, MarkerRegistry};
use crate::orbit::OrbitControls;
use crate::picking::{hover, pick, PickHit, PickOptions};
use crate::state::{Camera, CameraMode};
use glam::{Quat, Vec2, Vec3};
use instant::Instant;
use std::collections::VecDeque;

/// Wall-clock seconds since session start.
#[derive(Clone, Copy, Debug)]
pub struct SessionClock {
    start: Instant,
}

impl SessionClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_sec(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Per-frame render data for one marker, in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerInstance {
    pub marker: MarkerIndex,
    pub position: Vec3,
    pub rotation: Quat,
    pub size: f32,
    pub scale: f32,
    pub color_rgb: [f32; 3],
    pub emissive: f32,
    pub wireframe: bool,
}

/// Everything a renderer needs for one frame.
pub struct FrameSnapshot<'a> {
    pub elapsed_sec: f64,
    pub camera: &'a Camera,
    pub mode: CameraMode,
    pub globe_radius: f32,
    pub atmosphere_radius: f32,
    pub globe_rotation: Quat,
    pub grid: &'a GlobeGrid,
    pub markers: &'a [MarkerInstance],
    pub lights: &'a LightRig,
}

/// Rendering collaborator; called once at the end of every tick.
pub trait FrameSink {
    fn render(&mut self, frame: &FrameSnapshot<'_>);
}

pub struct GlobeSession {
    config: GlobeConfig,
    tuning: GlobeTuning,
    grid: GlobeGrid,
    registry: MarkerRegistry,
    camera: CameraController,
    orbit: OrbitControls,
    lights: LightRig,
    globe_angle: f32,
    queue: VecDeque<InputEvent>,
    last_tick_sec: Option<f64>,
    cursor: CursorStyle,
    instances: Vec<MarkerInstance>,
}

impl GlobeSession {
    pub fn new(config: GlobeConfig, tuning: GlobeTuning, markers: &[MarkerSpec]) -> Result<Self> {
        let registry = MarkerRegistry::from_specs(config.radius(), markers)?;
        let grid = GlobeGrid::build(&config)?;
        log::info!(
            "[session] radius={:.2} parallels={} meridians={} markers={}",
            config.radius(),
            grid.latitude.len(),
            grid.longitude.len(),
            registry.len()
        );
        Ok(Self {
            camera: CameraController::new(&tuning),
            orbit: OrbitControls::new(&tuning),
            lights: LightRig::default(),
            globe_angle: 0.0,
            queue: VecDeque::new(),
            last_tick_sec: None,
            cursor: CursorStyle::Default,
            instances: Vec::with_capacity(registry.len()),
            config,
            tuning,
            grid,
            registry,
        })
    }

    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }
    pub fn tuning(&self) -> &GlobeTuning {
        &self.tuning
    }
    pub fn grid(&self) -> &GlobeGrid {
        &self.grid
    }
    pub fn registry(&self) -> &MarkerRegistry {
        &self.registry
    }
    pub fn camera(&self) -> &CameraController {
        &self.camera
    }
    pub fn lights(&self) -> &LightRig {
        &self.lights
    }
    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    pub fn globe_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.globe_angle)
    }

    fn pick_options(&self) -> PickOptions {
        PickOptions {
            max_distance: self.tuning.pick_max_distance,
        }
    }

    pub fn enqueue(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    /// Resolve a pointer position to a marker without changing any state.
    pub fn pick_at(&self, ndc: Vec2) -> Option<PickHit> {
        let ray = self.camera.state().camera.ray_from_ndc(ndc);
        let proxies = self.registry.proxies(self.globe_rotation());
        pick(&ray, &proxies, &self.registry, self.pick_options())
    }

    pub fn hover_at(&self, ndc: Vec2) -> bool {
        let ray = self.camera.state().camera.ray_from_ndc(ndc);
        let proxies = self.registry.proxies(self.globe_rotation());
        hover(&ray, &proxies, &self.registry, self.pick_options())
    }

    /// One frame at wall-clock time `now_sec`.
    ///
    /// The globe only spins while free orbit is enabled, so it holds still
    /// during camera tweens, while focused and inside the post-decline guard.
    /// A focused marker therefore stays where the camera flew to.
    pub fn tick(&mut self, now_sec: f64, sink: &mut dyn FrameSink, events: &mut Vec<GlobeEvent>) {
        let dt_sec = self
            .last_tick_sec
            .map_or(0.0, |last| (now_sec - last).max(0.0)) as f32;
        self.last_tick_sec = Some(now_sec);

        while let Some(event) = self.queue.pop_front() {
            self.apply_input(event, now_sec, events);
        }

        if self.camera.orbit_enabled(now_sec) {
            self.globe_angle = (self.globe_angle + self.tuning.globe_spin_per_sec * dt_sec)
                .rem_euclid(std::f32::consts::TAU);
            let state = self.camera.state_mut();
            state.camera.eye = self
                .orbit
                .update(state.camera.eye, state.camera.target, dt_sec);
        } else {
            self.orbit.halt();
        }

        let rotation = self.globe_rotation();
        self.camera
            .advance(now_sec, &self.registry, rotation, events);

        self.registry.update_pulsation(now_sec);
        self.lights.update(now_sec);

        self.instances.clear();
        self.instances
            .extend(self.registry.iter().map(|(index, m)| MarkerInstance {
                marker: index,
                position: m.world_position(rotation),
                rotation: rotation * m.orientation,
                size: m.spec.size,
                scale: m.scale,
                color_rgb: m.spec.color_rgb,
                emissive: m.emissive,
                wireframe: m.spec.wireframe,
            }));

        let radius = self.config.radius();
        sink.render(&FrameSnapshot {
            elapsed_sec: now_sec,
            camera: &self.camera.state().camera,
            mode: self.camera.mode(),
            globe_radius: radius,
            atmosphere_radius: radius * ATMOSPHERE_SCALE,
            globe_rotation: rotation,
            grid: &self.grid,
            markers: &self.instances,
            lights: &self.lights,
        });
    }

    fn apply_input(&mut self, event: InputEvent, now_sec: f64, events: &mut Vec<GlobeEvent>) {
        match event {
            InputEvent::PointerClick { ndc } => self.on_click(ndc, now_sec, events),
            InputEvent::PointerMove { ndc } => {
                let cursor = if self.hover_at(ndc) {
                    CursorStyle::Pointer
                } else {
                    CursorStyle::Default
                };
                if cursor != self.cursor {
                    self.cursor = cursor;
                    events.push(GlobeEvent::CursorChanged(cursor));
                }
            }
            InputEvent::OrbitDrag { dx, dy } => {
                if self.camera.orbit_enabled(now_sec) {
                    self.orbit.drag(dx, dy);
                }
            }
            InputEvent::Zoom { steps } => {
                if self.camera.orbit_enabled(now_sec) {
                    self.orbit.zoom(steps);
                }
            }
            InputEvent::Key(key) => match key_command(&key) {
                Some(KeyCommand::Reset | KeyCommand::Confirm) => {
                    self.command(CameraCommand::Reset, now_sec, events);
                }
                Some(KeyCommand::Decline) => {
                    self.command(CameraCommand::Decline, now_sec, events);
                }
                None => {}
            },
            InputEvent::PromptAnswer { reset } => {
                let command = if reset {
                    CameraCommand::Reset
                } else {
                    CameraCommand::Decline
                };
                self.command(command, now_sec, events);
            }
            InputEvent::Resize { width, height } => {
                self.camera
                    .state_mut()
                    .camera
                    .set_viewport(width, height);
            }
        }
    }

    fn on_click(&mut self, ndc: Vec2, now_sec: f64, events: &mut Vec<GlobeEvent>) {
        if !self.camera.picks_enabled(now_sec) {
            log::debug!("[session] click ignored in {:?}", self.camera.mode());
            return;
        }
        let Some(hit) = self.pick_at(ndc) else {
            return;
        };
        log::info!("[click] {} at {:.2}", hit.id, hit.distance);
        let (scale, until) = (
            self.tuning.click_feedback_scale,
            now_sec + self.tuning.click_feedback_sec,
        );
        if let Some(marker) = self.registry.get_mut(hit.marker) {
            marker.start_feedback(scale, until);
        }
        self.command(CameraCommand::Pick(hit.marker), now_sec, events);
    }

    fn command(&mut self, command: CameraCommand, now_sec: f64, events: &mut Vec<GlobeEvent>) {
        let rotation = self.globe_rotation();
        if self
            .camera
            .handle(command, now_sec, &self.registry, rotation, events)
            && self.camera.mode().is_animating()
        {
            self.orbit.halt();
        }
    }
}
