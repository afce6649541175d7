use glam::Vec3;

// Shared visual/interaction tuning constants used by the core and the native frontend.

// Globe layout
pub const GLOBE_RADIUS: f32 = 5.0;
pub const LATITUDE_LINES: u32 = 24;
pub const LONGITUDE_LINES: u32 = 36;
pub const GRID_SEGMENTS: u32 = 128; // samples per grid line
pub const ATMOSPHERE_SCALE: f32 = 1.05; // atmosphere shell radius relative to the globe
pub const ATMOSPHERE_COLOR: u32 = 0x4444ff;
pub const ATMOSPHERE_OPACITY: f32 = 0.15;
pub const GLOBE_SPIN_PER_SEC: f32 = 0.06; // radians per second about +Y while orbiting

// Camera
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const DEFAULT_CAMERA_DISTANCE: f32 = 10.0; // camera rests at (0, 0, d)
pub const FOCUS_DISTANCE_FACTOR: f32 = 1.5; // focused camera sits at radius * factor

// Tweens (seconds)
pub const FOCUS_DURATION_SEC: f64 = 1.5;
pub const RESET_DURATION_SEC: f64 = 1.2;
pub const ORBIT_GUARD_SEC: f64 = 0.5; // orbit/picks ignored after declining a reset

// Interaction
pub const PICK_MAX_DISTANCE: f32 = 4.0; // hits at or beyond this are far-side noise
pub const CLICK_ZONE_SCALE: f32 = 1.05; // invisible click proxy around wireframe markers
pub const CLICK_FEEDBACK_SCALE: f32 = 1.5;
pub const CLICK_FEEDBACK_SEC: f64 = 0.3;

// Orbit controls
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05; // fraction of velocity shed per 60 Hz frame
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_SPEED: f32 = 1.0;
pub const ORBIT_MIN_DISTANCE: f32 = 6.0;
pub const ORBIT_MAX_DISTANCE: f32 = 40.0;

// Marker animation
pub const MARKER_FLOAT_AMPLITUDE: f32 = 0.02;
pub const MARKER_FLOAT_RATE: f32 = 2.0;
pub const MARKER_EMISSIVE_AMPLITUDE: f32 = 0.2;
pub const MARKER_EMISSIVE_RATE: f32 = 3.0;
pub const MARKER_EMISSIVE_BASE: f32 = 0.3; // pulse centre for every marker
pub const MARKER_EMISSIVE_WIREFRAME: f32 = 0.4; // wireframe glow before the first update
pub const MARKER_TUMBLE_RATES: [f32; 3] = [0.6, 0.9, 0.3]; // radians per second about local X, Y, Z

// Lights
pub const AMBIENT_INTENSITY: f32 = 0.3;
pub const DIRECTIONAL_INTENSITY: f32 = 1.2;
pub const DIRECTIONAL_POSITION: [f32; 3] = [10.0, 10.0, 5.0];
pub const POINT_A_COLOR: u32 = 0x4444ff;
pub const POINT_B_COLOR: u32 = 0xad45c6;
pub const POINT_A_ORBIT_RADIUS: f32 = 15.0;
pub const POINT_B_POSITION: [f32; 3] = [5.0, -8.0, -5.0];

// Grid colour (violet) and background
pub const GRID_COLOR: u32 = 0xad45c6;
pub const GRID_OPACITY: f32 = 0.8;
pub const CLEAR_COLOR: [f64; 3] = [0.02, 0.02, 0.04];

/// Convert a `0xRRGGBB` literal into an RGB triple in \[0, 1\].
#[inline]
pub fn rgb_from_hex(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

#[inline]
pub fn default_camera_position() -> Vec3 {
    Vec3::new(0.0, 0.0, DEFAULT_CAMERA_DISTANCE)
}
