pub mod canvas;
pub mod error;
pub mod game_registry;
pub mod game_trait;
pub mod hud;
pub mod loader;
pub mod module;
pub mod selection;
pub mod shell;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::game_trait::{CanvasGame, Key, Painter, TextAlign};

    /// One recorded drawing call.
    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawOp {
        Rect {
            x: f64,
            y: f64,
            w: f64,
            h: f64,
            color: String,
        },
        Line {
            from: (f64, f64),
            to: (f64, f64),
            color: String,
        },
        Circle {
            cx: f64,
            cy: f64,
            radius: f64,
            color: String,
        },
        Text {
            text: String,
            x: f64,
            y: f64,
            size_px: u32,
            align: TextAlign,
        },
    }

    /// Painter that records every call against an 800x600 buffer.
    pub struct RecordingPainter {
        pub width: f64,
        pub height: f64,
        pub ops: Vec<DrawOp>,
    }

    impl Default for RecordingPainter {
        fn default() -> Self {
            Self {
                width: 800.0,
                height: 600.0,
                ops: Vec::new(),
            }
        }
    }

    impl RecordingPainter {
        /// All text drawn, in order.
        pub fn texts(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    DrawOp::Text { text, .. } => Some(text.as_str()),
                    _ => None,
                })
                .collect()
        }

        /// Rectangles drawn in `color`.
        pub fn rects_in(&self, color: &str) -> usize {
            self.ops
                .iter()
                .filter(|op| matches!(op, DrawOp::Rect { color: c, .. } if c == color))
                .count()
        }
    }

    impl Painter for RecordingPainter {
        fn buffer_size(&self) -> (f64, f64) {
            (self.width, self.height)
        }

        fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) {
            self.ops.push(DrawOp::Rect {
                x,
                y,
                w,
                h,
                color: color.to_string(),
            });
        }

        fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), _width: f64, color: &str) {
            self.ops.push(DrawOp::Line {
                from,
                to,
                color: color.to_string(),
            });
        }

        fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: &str) {
            self.ops.push(DrawOp::Circle {
                cx,
                cy,
                radius,
                color: color.to_string(),
            });
        }

        fn fill_text(
            &mut self,
            text: &str,
            x: f64,
            y: f64,
            size_px: u32,
            align: TextAlign,
            _color: &str,
        ) {
            self.ops.push(DrawOp::Text {
                text: text.to_string(),
                x,
                y,
                size_px,
                align,
            });
        }
    }

    /// Run `update` in fixed steps, returning early if the game ends.
    pub fn run_frames(game: &mut dyn CanvasGame, frames: usize, dt_ms: f64) {
        for _ in 0..frames {
            if game.is_game_over() {
                return;
            }
            game.update(dt_ms);
        }
    }

    // ================================================================
    // CanvasGame contract tests
    // ================================================================
    // Generic checks every game crate runs from its own #[cfg(test)] module.

    /// A fresh game is running, scoreless, and draws its score line.
    pub fn contract_fresh_game_draws_score(game: &dyn CanvasGame) {
        assert!(!game.is_game_over(), "fresh game must be running");
        assert_eq!(game.score(), 0, "fresh game must start at zero");
        let mut painter = RecordingPainter::default();
        game.draw(&mut painter);
        assert!(
            painter.texts().contains(&"Score: 0"),
            "draw must include the score line, got {:?}",
            painter.texts()
        );
        assert!(
            !painter.texts().contains(&"Game Over!"),
            "running game must not show the game-over banner"
        );
    }

    /// Arrow keys are consumed; unrelated keys are not.
    pub fn contract_arrow_keys_consumed(game: &mut dyn CanvasGame) {
        assert!(game.key_down(Key::ArrowLeft));
        assert!(!game.key_down(Key::Other));
    }

    /// Once over, the banner shows, updates are inert and R restarts.
    pub fn contract_game_over_then_restart(game: &mut dyn CanvasGame) {
        assert!(game.is_game_over(), "caller must pass a finished game");
        let score = game.score();
        game.update(10_000.0);
        assert_eq!(game.score(), score, "updates after game over must be inert");

        let mut painter = RecordingPainter::default();
        game.draw(&mut painter);
        assert!(painter.texts().contains(&"Game Over!"));

        assert!(game.key_down(Key::Restart));
        assert!(!game.is_game_over(), "R must restart a finished game");
        assert_eq!(game.score(), 0);
    }
}
