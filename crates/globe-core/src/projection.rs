//! Latitude/longitude ↔ world-space conversion on a sphere centred at the origin.
//!
//! Convention: north pole at +Y, longitude 0 on +X, longitude -90 on +Z.
//! Grid lines and markers both go through [`project`], so a marker at
//! `(lat, lng)` lies exactly on the grid lines encoding that coordinate.

use glam::Vec3;

/// Map `(lat, lng)` in degrees to a point at distance `radius` from the origin.
///
/// Out-of-range angles are not rejected; they simply wrap through the
/// trigonometry.
#[inline]
pub fn project(lat: f32, lng: f32, radius: f32) -> Vec3 {
    let phi = (90.0 - lat).to_radians();
    let theta = (lng + 180.0).to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    Vec3::new(
        -radius * sin_phi * cos_theta,
        radius * cos_phi,
        radius * sin_phi * sin_theta,
    )
}

/// Inverse of [`project`]: returns `(lat, lng, radius)` with `lng` in
/// `(-180, 180]`. The origin maps to `(0, 0, 0)`.
#[inline]
pub fn unproject(p: Vec3) -> (f32, f32, f32) {
    let radius = p.length();
    if radius <= f32::EPSILON {
        return (0.0, 0.0, 0.0);
    }
    let lat = (p.y / radius).clamp(-1.0, 1.0).asin().to_degrees();
    let lng = (-p.z).atan2(p.x).to_degrees();
    (lat, lng, radius)
}

/// Wrap a longitude in degrees into `(-180, 180]`.
#[inline]
pub fn wrap_longitude(lng: f32) -> f32 {
    let w = (lng + 180.0).rem_euclid(360.0) - 180.0;
    if w == -180.0 {
        180.0
    } else {
        w
    }
}
