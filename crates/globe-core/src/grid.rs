//! Wireframe latitude/longitude grid geometry.

use crate::config::GlobeConfig;
use crate::error::{GlobeError, Result};
use crate::projection::{project, wrap_longitude};
use glam::{Quat, Vec3};

/// Ordered samples of one grid line.
pub type Polyline = Vec<Vec3>;

/// Longitude of the unrotated meridian (the +Z half-plane).
const BASE_MERIDIAN_LNG: f32 = -90.0;

/// Latitude in degrees encoded by row `i` of a `count`-row latitude grid.
/// Rows 0 and `count - 1` are the poles and are never built.
#[inline]
pub fn parallel_latitude(i: u32, count: u32) -> f32 {
    -90.0 + 180.0 * i as f32 / (count - 1) as f32
}

/// Longitude in degrees encoded by meridian `i` of a `count`-meridian grid.
#[inline]
pub fn meridian_longitude(i: u32, count: u32) -> f32 {
    wrap_longitude(BASE_MERIDIAN_LNG + 360.0 * i as f32 / count as f32)
}

fn check_line_params(radius: f32, segments: u32) -> Result<()> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(GlobeError::InvalidRadius(radius));
    }
    if segments < 3 {
        return Err(GlobeError::TooFewSegments(segments));
    }
    Ok(())
}

/// `count - 2` circles of constant latitude, each sampled at `segments + 1`
/// points over a full turn. Sample `j` sits at longitude `-360 * j / segments`,
/// so the first and last samples coincide.
pub fn build_latitude_lines(radius: f32, count: u32, segments: u32) -> Result<Vec<Polyline>> {
    check_line_params(radius, segments)?;
    if count < 2 {
        return Err(GlobeError::TooFewLatitudeLines(count));
    }
    Ok((1..count - 1)
        .map(|i| {
            let lat = parallel_latitude(i, count);
            (0..=segments)
                .map(|j| {
                    let lng = -360.0 * j as f32 / segments as f32;
                    project(lat, lng, radius)
                })
                .collect()
        })
        .collect())
}

/// `count` meridians. Each is the base meridian sampled pole to pole at
/// `segments + 1` points, rotated about +Y by `2π·i/count`.
pub fn build_longitude_lines(radius: f32, count: u32, segments: u32) -> Result<Vec<Polyline>> {
    check_line_params(radius, segments)?;
    if count < 1 {
        return Err(GlobeError::TooFewLongitudeLines(count));
    }
    let base: Polyline = (0..=segments)
        .map(|k| {
            let lat = -90.0 + 180.0 * k as f32 / segments as f32;
            project(lat, BASE_MERIDIAN_LNG, radius)
        })
        .collect();

    Ok((0..count)
        .map(|i| {
            let rot = Quat::from_rotation_y(std::f32::consts::TAU * i as f32 / count as f32);
            base.iter().map(|p| rot * *p).collect()
        })
        .collect())
}

/// Both halves of the grid for one globe.
#[derive(Clone, Debug)]
pub struct GlobeGrid {
    pub latitude: Vec<Polyline>,
    pub longitude: Vec<Polyline>,
}

impl GlobeGrid {
    pub fn build(config: &GlobeConfig) -> Result<Self> {
        let latitude = build_latitude_lines(
            config.radius(),
            config.latitude_lines(),
            config.grid_segments(),
        )?;
        let longitude = build_longitude_lines(
            config.radius(),
            config.longitude_lines(),
            config.grid_segments(),
        )?;
        log::debug!(
            "[grid] {} parallels, {} meridians, {} segments",
            latitude.len(),
            longitude.len(),
            config.grid_segments()
        );
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &Polyline> {
        self.latitude.iter().chain(self.longitude.iter())
    }
}
