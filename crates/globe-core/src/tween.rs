//! Time-sampled interpolation of the camera position.

use glam::Vec3;

/// Identifies one tween. A completion is only honored when its token is
/// still the current one, so a superseded tween can never finish.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TweenToken(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Cubic ease-in-out (`power2.inOut` in GSAP naming).
    #[default]
    CubicInOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct Tween {
    pub token: TweenToken,
    pub from: Vec3,
    pub to: Vec3,
    pub start_sec: f64,
    pub duration_sec: f64,
    pub easing: Easing,
}

impl Tween {
    /// Normalized progress in \[0, 1\] at wall-clock time `now_sec`.
    pub fn progress(&self, now_sec: f64) -> f32 {
        if self.duration_sec <= 0.0 {
            return 1.0;
        }
        ((now_sec - self.start_sec) / self.duration_sec).clamp(0.0, 1.0) as f32
    }

    pub fn sample(&self, now_sec: f64) -> Vec3 {
        let p = self.progress(now_sec);
        if p >= 1.0 {
            return self.to;
        }
        self.from.lerp(self.to, self.easing.apply(p))
    }

    pub fn is_finished(&self, now_sec: f64) -> bool {
        self.progress(now_sec) >= 1.0
    }
}
