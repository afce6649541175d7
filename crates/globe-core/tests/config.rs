// Host-side tests for configuration validation and defaults.

use globe_core::config::validate_markers;
use globe_core::constants::rgb_from_hex;
use globe_core::{default_markers, GlobeConfig, GlobeError, GlobeTuning};

#[test]
fn default_config_matches_tuned_globe() {
    let c = GlobeConfig::default();
    assert_eq!(c.radius(), 5.0);
    assert_eq!(c.latitude_lines(), 24);
    assert_eq!(c.longitude_lines(), 36);
    assert_eq!(c.grid_segments(), 128);
}

#[test]
fn degenerate_geometry_is_rejected() {
    assert_eq!(GlobeConfig::new(0.0, 24, 36, 64), Err(GlobeError::InvalidRadius(0.0)));
    assert_eq!(GlobeConfig::new(-1.0, 24, 36, 64), Err(GlobeError::InvalidRadius(-1.0)));
    assert!(matches!(
        GlobeConfig::new(f32::NAN, 24, 36, 64),
        Err(GlobeError::InvalidRadius(_))
    ));
    assert_eq!(GlobeConfig::new(5.0, 24, 36, 2), Err(GlobeError::TooFewSegments(2)));
    assert_eq!(GlobeConfig::new(5.0, 1, 36, 64), Err(GlobeError::TooFewLatitudeLines(1)));
    assert_eq!(GlobeConfig::new(5.0, 24, 0, 64), Err(GlobeError::TooFewLongitudeLines(0)));
    assert!(GlobeConfig::new(5.0, 2, 1, 3).is_ok());
}

#[test]
fn errors_describe_the_problem() {
    let msg = GlobeError::TooFewSegments(1).to_string();
    assert!(msg.contains("segments"), "{msg}");
    let msg = GlobeError::DuplicateMarkerId("X".into()).to_string();
    assert!(msg.contains("`X`"), "{msg}");
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn tuning_defaults_are_consistent() {
    let t = GlobeTuning::default();
    assert_eq!(t.pick_max_distance, 4.0);
    assert!(t.focus_duration_sec > 0.0 && t.reset_duration_sec > 0.0);
    assert!(t.orbit_min_distance < t.default_camera_distance);
    assert!(t.default_camera_distance < t.orbit_max_distance);
    // the focused camera must stay outside the globe
    assert!(t.focus_distance_factor > 1.0);
    assert!(t.orbit_damping_factor > 0.0 && t.orbit_damping_factor < 1.0);
}

#[test]
fn default_markers_are_valid() {
    let markers = default_markers();
    assert_eq!(markers.len(), 4);
    assert!(validate_markers(&markers).is_ok());
    assert!(markers.iter().all(|m| m.wireframe));
}

#[test]
fn hex_colors_convert_to_unit_rgb() {
    assert_eq!(rgb_from_hex(0xff0000), [1.0, 0.0, 0.0]);
    assert_eq!(rgb_from_hex(0x000000), [0.0, 0.0, 0.0]);
    let [r, g, b] = rgb_from_hex(0x3366cc);
    assert!((r - 0.2).abs() < 1e-6 && (g - 0.4).abs() < 1e-6 && (b - 0.8).abs() < 1e-6);
}
