use glam::Vec2;

/// Pointer travel (pixels) beyond which a press-release is a drag, not a click.
pub const CLICK_SLOP_PX: f32 = 4.0;

/// Window-layer input, queued and applied at the start of the next tick.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    PointerClick { ndc: Vec2 },
    PointerMove { ndc: Vec2 },
    /// Drag delta in viewport fractions (full width = 1.0).
    OrbitDrag { dx: f32, dy: f32 },
    /// Wheel steps, positive zooms in.
    Zoom { steps: f32 },
    Key(String),
    /// Answer to the "return to default view?" prompt shown after focusing.
    PromptAnswer { reset: bool },
    Resize { width: u32, height: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    Reset,
    Confirm,
    Decline,
}

#[inline]
pub fn key_command(key: &str) -> Option<KeyCommand> {
    match key {
        "r" | "R" | "Escape" => Some(KeyCommand::Reset),
        "Enter" => Some(KeyCommand::Confirm),
        " " | "n" | "N" => Some(KeyCommand::Decline),
        _ => None,
    }
}

/// Pixel position (origin top-left) to normalized device coordinates.
#[inline]
pub fn ndc_from_pixels(x: f32, y: f32, width: u32, height: u32) -> Vec2 {
    let w = width.max(1) as f32;
    let h = height.max(1) as f32;
    Vec2::new((x / w) * 2.0 - 1.0, -(y / h) * 2.0 + 1.0)
}

#[derive(Default, Clone, Copy, Debug)]
pub struct MouseState {
    pub x: f32,
    pub y: f32,
    pub down: bool,
    press_x: f32,
    press_y: f32,
    dragged: bool,
}

impl MouseState {
    pub fn press(&mut self) {
        self.down = true;
        self.press_x = self.x;
        self.press_y = self.y;
        self.dragged = false;
    }

    /// Track a move; while the button is held, returns the orbit drag delta.
    pub fn moved(&mut self, x: f32, y: f32, width: u32, height: u32) -> Option<InputEvent> {
        let (dx, dy) = (x - self.x, y - self.y);
        self.x = x;
        self.y = y;
        if !self.down {
            return None;
        }
        let travel = Vec2::new(x - self.press_x, y - self.press_y).length();
        if travel > CLICK_SLOP_PX {
            self.dragged = true;
        }
        Some(InputEvent::OrbitDrag {
            dx: dx / width.max(1) as f32,
            dy: dy / height.max(1) as f32,
        })
    }

    /// Release; a press that never left the slop radius becomes a click.
    pub fn release(&mut self, width: u32, height: u32) -> Option<InputEvent> {
        let was_down = std::mem::replace(&mut self.down, false);
        (was_down && !self.dragged).then(|| InputEvent::PointerClick {
            ndc: ndc_from_pixels(self.x, self.y, width, height),
        })
    }

    pub fn ndc(&self, width: u32, height: u32) -> Vec2 {
        ndc_from_pixels(self.x, self.y, width, height)
    }
}
