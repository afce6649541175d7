//! Camera-side state types shared with the native frontend.
//!
//! These types avoid referencing platform-specific APIs. The frontend consumes
//! them to build camera matrices and to turn pointer positions into pick rays.

use crate::constants::*;
use crate::picking::Ray;
use crate::tween::TweenToken;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: default_camera_position(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// World-space ray through normalized device coordinates (`x`, `y` in
    /// \[-1, 1\], +y up), starting at the eye.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        Ray::new(self.eye, p1 - self.eye)
    }
}

/// Camera mode; decides whether orbit input is honored and whether a tween
/// is in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CameraMode {
    #[default]
    Orbiting,
    AnimatingIn,
    Focused,
    AnimatingOut,
}

impl CameraMode {
    #[inline]
    pub fn is_animating(self) -> bool {
        matches!(self, CameraMode::AnimatingIn | CameraMode::AnimatingOut)
    }
}

/// The one camera state of a session.
#[derive(Clone, Debug, Default)]
pub struct CameraState {
    pub camera: Camera,
    pub mode: CameraMode,
    pub active_tween: Option<TweenToken>,
}

impl CameraState {
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.camera.eye
    }
    #[inline]
    pub fn target(&self) -> Vec3 {
        self.camera.target
    }
}
