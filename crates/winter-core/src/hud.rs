//! Colours and overlays shared by every game so they read as one arcade.

use crate::game_trait::{Painter, TextAlign};

pub const BACKGROUND: &str = "#1a3009";
pub const GOLD: &str = "#d4af37";
pub const HIGHLIGHT: &str = "#f0c959";
pub const GRID_LINE: &str = "#2d5016";
pub const RED: &str = "#F00000";
const BANNER_SHADE: &str = "rgba(0, 0, 0, 0.7)";

/// Fill the whole drawing buffer with the background colour.
pub fn clear(painter: &mut dyn Painter) {
    let (w, h) = painter.buffer_size();
    painter.fill_rect(0.0, 0.0, w, h, BACKGROUND);
}

/// One line of the top-left status block. `line` 0 sits at y=30, each
/// following line 30px lower.
pub fn status_line(painter: &mut dyn Painter, line: u32, text: &str) {
    let y = 30.0 + f64::from(line) * 30.0;
    painter.fill_text(text, 10.0, y, 24, TextAlign::Left, GOLD);
}

/// Dimmed band across the middle with the game-over message.
pub fn game_over_banner(painter: &mut dyn Painter) {
    let (w, h) = painter.buffer_size();
    let mid = h / 2.0;
    painter.fill_rect(0.0, mid - 40.0, w, 80.0, BANNER_SHADE);
    painter.fill_text("Game Over!", w / 2.0, mid, 36, TextAlign::Center, GOLD);
    painter.fill_text(
        "Press R to restart",
        w / 2.0,
        mid + 30.0,
        18,
        TextAlign::Center,
        GOLD,
    );
}
