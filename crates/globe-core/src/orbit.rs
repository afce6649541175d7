//! Free orbit around the globe centre with damped drag and clamped zoom.

use crate::config::GlobeTuning;
use glam::Vec3;

const MIN_POLAR: f32 = 1e-3;
const REFERENCE_HZ: f32 = 60.0;
const REST_EPSILON: f32 = 1e-5;

#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    // pending angular velocity (azimuth, polar) in radians per reference frame
    delta_azimuth: f32,
    delta_polar: f32,
    zoom_scale: f32,
}

impl OrbitControls {
    pub fn new(tuning: &GlobeTuning) -> Self {
        Self {
            damping_factor: tuning.orbit_damping_factor,
            rotate_speed: tuning.orbit_rotate_speed,
            zoom_speed: tuning.orbit_zoom_speed,
            min_distance: tuning.orbit_min_distance,
            max_distance: tuning.orbit_max_distance,
            delta_azimuth: 0.0,
            delta_polar: 0.0,
            zoom_scale: 1.0,
        }
    }

    /// Pointer drag in normalized viewport units (a full-width drag is 1.0).
    pub fn drag(&mut self, dx: f32, dy: f32) {
        let tau = std::f32::consts::TAU;
        self.delta_azimuth -= dx * tau * self.rotate_speed;
        self.delta_polar -= dy * tau * self.rotate_speed;
    }

    /// Positive `steps` zooms in.
    pub fn zoom(&mut self, steps: f32) {
        self.zoom_scale *= 0.95_f32.powf(steps * self.zoom_speed);
    }

    /// Drop any pending motion, e.g. when control passes to a tween.
    pub fn halt(&mut self) {
        self.delta_azimuth = 0.0;
        self.delta_polar = 0.0;
        self.zoom_scale = 1.0;
    }

    pub fn is_moving(&self) -> bool {
        self.delta_azimuth.abs() > REST_EPSILON || self.delta_polar.abs() > REST_EPSILON
    }

    /// Apply one damped step and return the new camera position. The current
    /// `position` is re-read every call so tweens can hand control back at any
    /// point.
    pub fn update(&mut self, position: Vec3, target: Vec3, dt_sec: f32) -> Vec3 {
        let offset = position - target;
        let mut radius = offset.length();
        if radius <= f32::EPSILON {
            return position;
        }
        let mut azimuth = offset.x.atan2(offset.z);
        let mut polar = (offset.y / radius).clamp(-1.0, 1.0).acos();

        // Shed a fixed fraction per 60 Hz frame regardless of the actual rate.
        let frames = (dt_sec * REFERENCE_HZ).max(0.0);
        let step = self.damping_factor * frames;
        azimuth += self.delta_azimuth * step;
        polar = (polar + self.delta_polar * step)
            .clamp(MIN_POLAR, std::f32::consts::PI - MIN_POLAR);
        radius = (radius * self.zoom_scale).clamp(self.min_distance, self.max_distance);

        let keep = (1.0 - self.damping_factor).powf(frames);
        self.delta_azimuth *= keep;
        self.delta_polar *= keep;
        if !self.is_moving() {
            self.delta_azimuth = 0.0;
            self.delta_polar = 0.0;
        }
        self.zoom_scale = 1.0;

        let (sin_p, cos_p) = polar.sin_cos();
        let (sin_a, cos_a) = azimuth.sin_cos();
        target + Vec3::new(radius * sin_p * sin_a, radius * cos_p, radius * sin_p * cos_a)
    }
}
