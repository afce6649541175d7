use thiserror::Error;

/// Configuration failures detected while building a globe session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GlobeError {
    #[error("globe radius must be a positive finite number, got {0}")]
    InvalidRadius(f32),
    #[error("grid needs at least 3 segments per line, got {0}")]
    TooFewSegments(u32),
    #[error("latitude grid needs at least 2 rows (both poles), got {0}")]
    TooFewLatitudeLines(u32),
    #[error("longitude grid needs at least 1 meridian, got {0}")]
    TooFewLongitudeLines(u32),
    #[error("marker `{id}` has invalid size {size}")]
    InvalidMarkerSize { id: String, size: f32 },
    #[error("marker id `{0}` is declared more than once")]
    DuplicateMarkerId(String),
}

pub type Result<T> = std::result::Result<T, GlobeError>;
