use crate::constants::*;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub color_rgb: [f32; 3],
    pub intensity: f32,
    pub position: Vec3,
}

/// Scene lighting. Intensities and the orbiting point light are periodic in
/// elapsed time; the renderer only reads the values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightRig {
    pub ambient: f32,
    pub directional: f32,
    pub directional_position: Vec3,
    pub point_a: PointLight,
    pub point_b: PointLight,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient: AMBIENT_INTENSITY,
            directional: DIRECTIONAL_INTENSITY,
            directional_position: Vec3::from(DIRECTIONAL_POSITION),
            point_a: PointLight {
                color_rgb: rgb_from_hex(POINT_A_COLOR),
                intensity: 0.8,
                position: Vec3::new(-10.0, 5.0, 10.0),
            },
            point_b: PointLight {
                color_rgb: rgb_from_hex(POINT_B_COLOR),
                intensity: 0.6,
                position: Vec3::from(POINT_B_POSITION),
            },
        }
    }
}

impl LightRig {
    pub fn update(&mut self, t: f64) {
        self.point_a.intensity = 0.8 + (t * 2.0).sin() as f32 * 0.3;
        self.point_b.intensity = 0.6 + (t * 1.5).cos() as f32 * 0.2;
        let (sin_o, cos_o) = (t * 0.5).sin_cos();
        self.point_a.position.x = cos_o as f32 * POINT_A_ORBIT_RADIUS;
        self.point_a.position.z = sin_o as f32 * POINT_A_ORBIT_RADIUS;
    }
}
