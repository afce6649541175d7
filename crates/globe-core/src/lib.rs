pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod grid;
pub mod input;
pub mod lights;
pub mod markers;
pub mod orbit;
pub mod picking;
pub mod projection;
pub mod scheduler;
pub mod state;
pub mod tween;

pub static LINES_WGSL: &str = include_str!("../shaders/lines.wgsl");

pub use camera::{CameraCommand, CameraController};
pub use config::{default_markers, GlobeConfig, GlobeTuning, MarkerSpec};
pub use constants::*;
pub use error::GlobeError;
pub use events::{CursorStyle, FocusInfo, GlobeEvent};
pub use grid::{build_latitude_lines, build_longitude_lines, GlobeGrid, Polyline};
pub use input::{InputEvent, MouseState};
pub use markers::{Marker, MarkerIndex, MarkerRegistry};
pub use picking::{pick, PickHit, PickOptions, PickProxy, Ray};
pub use projection::{project, unproject};
pub use scheduler::{FrameSink, FrameSnapshot, GlobeSession, MarkerInstance, SessionClock};
pub use state::{Camera, CameraMode, CameraState};
