/// Keys the games react to, decoded from `KeyboardEvent.key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Space,
    Restart,
    Other,
}

impl Key {
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            " " | "Spacebar" => Key::Space,
            "r" | "R" => Key::Restart,
            _ => Key::Other,
        }
    }
}

/// Horizontal anchor for [`Painter::fill_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// Minimal 2D drawing surface, in drawing-buffer coordinates.
///
/// The browser client implements this over `CanvasRenderingContext2d`; tests
/// use a recording implementation.
pub trait Painter {
    /// Drawing-buffer size (not the displayed CSS size).
    fn buffer_size(&self) -> (f64, f64);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str);

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: &str);

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: &str);

    fn fill_text(&mut self, text: &str, x: f64, y: f64, size_px: u32, align: TextAlign, color: &str);
}

/// Per-frame contract every playable game implements.
///
/// The client owns the frame loop; a game only advances its simulation,
/// reacts to keys and draws itself.
pub trait CanvasGame {
    /// Advance the simulation by `dt_ms` milliseconds of wall time.
    fn update(&mut self, dt_ms: f64);

    /// Handle a key press. Returns true when the key was consumed and the
    /// browser default should be suppressed.
    fn key_down(&mut self, key: Key) -> bool;

    fn draw(&self, painter: &mut dyn Painter);

    fn score(&self) -> u32;

    fn is_game_over(&self) -> bool;

    /// Reset to a fresh round.
    fn restart(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_keys_decode() {
        assert_eq!(Key::from_dom_key("ArrowLeft"), Key::ArrowLeft);
        assert_eq!(Key::from_dom_key(" "), Key::Space);
        assert_eq!(Key::from_dom_key("R"), Key::Restart);
        assert_eq!(Key::from_dom_key("r"), Key::Restart);
        assert_eq!(Key::from_dom_key("Enter"), Key::Other);
    }
}
