use crate::markers::Marker;

/// Display data for a focused marker, handed to the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub struct FocusInfo {
    pub id: String,
    pub title: String,
    pub lat: f32,
    pub lng: f32,
    pub color_rgb: [f32; 3],
}

impl FocusInfo {
    pub fn from_marker(marker: &Marker) -> Self {
        Self {
            id: marker.spec.id.clone(),
            title: marker.spec.title.clone(),
            lat: marker.spec.lat,
            lng: marker.spec.lng,
            color_rgb: marker.spec.color_rgb,
        }
    }

    /// Lowercase `rrggbb` form of the marker colour.
    pub fn color_hex(&self) -> String {
        let [r, g, b] = self.color_rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        format!("{r:02x}{g:02x}{b:02x}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CursorStyle {
    #[default]
    Default,
    Pointer,
}

/// Notifications for the presentation layer, collected during a tick.
#[derive(Clone, Debug, PartialEq)]
pub enum GlobeEvent {
    MarkerFocused(FocusInfo),
    ReturnedToDefault,
    CursorChanged(CursorStyle),
}
