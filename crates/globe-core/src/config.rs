//! Session configuration: globe geometry, interaction tuning and the startup
//! marker set.
//!
//! Geometry is validated once in [`GlobeConfig::new`]; everything downstream
//! (grid builders, marker placement) assumes a validated config and never
//! re-checks.

use crate::constants::*;
use crate::error::{GlobeError, Result};
use fnv::FnvHashSet;

/// Immutable globe geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlobeConfig {
    radius: f32,
    latitude_lines: u32,
    longitude_lines: u32,
    grid_segments: u32,
}

impl GlobeConfig {
    pub fn new(
        radius: f32,
        latitude_lines: u32,
        longitude_lines: u32,
        grid_segments: u32,
    ) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(GlobeError::InvalidRadius(radius));
        }
        if grid_segments < 3 {
            return Err(GlobeError::TooFewSegments(grid_segments));
        }
        if latitude_lines < 2 {
            return Err(GlobeError::TooFewLatitudeLines(latitude_lines));
        }
        if longitude_lines < 1 {
            return Err(GlobeError::TooFewLongitudeLines(longitude_lines));
        }
        Ok(Self {
            radius,
            latitude_lines,
            longitude_lines,
            grid_segments,
        })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
    pub fn latitude_lines(&self) -> u32 {
        self.latitude_lines
    }
    pub fn longitude_lines(&self) -> u32 {
        self.longitude_lines
    }
    pub fn grid_segments(&self) -> u32 {
        self.grid_segments
    }
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            radius: GLOBE_RADIUS,
            latitude_lines: LATITUDE_LINES,
            longitude_lines: LONGITUDE_LINES,
            grid_segments: GRID_SEGMENTS,
        }
    }
}

/// Interaction and animation tuning. The defaults reproduce the hand-tuned
/// look; all of them are plain data so a frontend can override any field.
#[derive(Clone, Debug)]
pub struct GlobeTuning {
    pub pick_max_distance: f32,
    pub focus_duration_sec: f64,
    pub reset_duration_sec: f64,
    pub focus_distance_factor: f32,
    pub default_camera_distance: f32,
    pub orbit_guard_sec: f64,
    pub orbit_damping_factor: f32,
    pub orbit_rotate_speed: f32,
    pub orbit_zoom_speed: f32,
    pub orbit_min_distance: f32,
    pub orbit_max_distance: f32,
    pub globe_spin_per_sec: f32,
    pub click_feedback_scale: f32,
    pub click_feedback_sec: f64,
}

impl Default for GlobeTuning {
    fn default() -> Self {
        Self {
            pick_max_distance: PICK_MAX_DISTANCE,
            focus_duration_sec: FOCUS_DURATION_SEC,
            reset_duration_sec: RESET_DURATION_SEC,
            focus_distance_factor: FOCUS_DISTANCE_FACTOR,
            default_camera_distance: DEFAULT_CAMERA_DISTANCE,
            orbit_guard_sec: ORBIT_GUARD_SEC,
            orbit_damping_factor: ORBIT_DAMPING_FACTOR,
            orbit_rotate_speed: ORBIT_ROTATE_SPEED,
            orbit_zoom_speed: ORBIT_ZOOM_SPEED,
            orbit_min_distance: ORBIT_MIN_DISTANCE,
            orbit_max_distance: ORBIT_MAX_DISTANCE,
            globe_spin_per_sec: GLOBE_SPIN_PER_SEC,
            click_feedback_scale: CLICK_FEEDBACK_SCALE,
            click_feedback_sec: CLICK_FEEDBACK_SEC,
        }
    }
}

/// Static startup description of one project marker.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerSpec {
    pub id: String,
    pub title: String,
    pub lat: f32,
    pub lng: f32,
    pub color_rgb: [f32; 3],
    pub size: f32,
    pub wireframe: bool,
}

impl MarkerSpec {
    pub fn new(id: &str, title: &str, lat: f32, lng: f32, color_hex: u32, size: f32) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            lat,
            lng,
            color_rgb: rgb_from_hex(color_hex),
            size,
            wireframe: true,
        }
    }

    pub fn solid(mut self) -> Self {
        self.wireframe = false;
        self
    }
}

/// Reject marker sets that would break registry invariants: every id unique,
/// every size positive.
pub fn validate_markers(specs: &[MarkerSpec]) -> Result<()> {
    let mut seen = FnvHashSet::default();
    for spec in specs {
        if !spec.size.is_finite() || spec.size <= 0.0 {
            return Err(GlobeError::InvalidMarkerSize {
                id: spec.id.clone(),
                size: spec.size,
            });
        }
        if !seen.insert(spec.id.as_str()) {
            return Err(GlobeError::DuplicateMarkerId(spec.id.clone()));
        }
    }
    Ok(())
}

/// The four showcase projects.
pub fn default_markers() -> Vec<MarkerSpec> {
    vec![
        MarkerSpec::new("Project-1", "Galactic Data Center", -20.0, 10.0, 0xff3333, 0.25),
        MarkerSpec::new("Project-2", "E-commerce Website", 45.0, 2.0, 0x33ff33, 0.22),
        MarkerSpec::new("Project-3", "Mobile Application", -35.0, -60.0, 0x3333ff, 0.28),
        MarkerSpec::new("Project-4", "Art Portfolio", 35.0, 120.0, 0xffff33, 0.24),
    ]
}
