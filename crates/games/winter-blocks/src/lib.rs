pub mod board;
pub mod config;
pub mod piece;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use winter_core::game_trait::{CanvasGame, Key, Painter};
use winter_core::hud;

use board::Board;
pub use config::BlocksConfig;
use piece::{Piece, PieceKind, rotate_clockwise};

/// Falling-blocks game: pieces drop on a timer, full rows clear for points,
/// and the game ends when a new piece cannot spawn.
pub struct BlocksGame {
    config: BlocksConfig,
    board: Board,
    piece: Option<Piece>,
    score: u32,
    lines: u32,
    game_over: bool,
    drop_timer_ms: f64,
    rng: StdRng,
}

impl BlocksGame {
    pub fn new(config: BlocksConfig, seed: u64) -> Self {
        let mut game = Self {
            board: Board::new(config.grid_width, config.grid_height),
            config,
            piece: None,
            score: 0,
            lines: 0,
            game_over: false,
            drop_timer_ms: 0.0,
            rng: StdRng::seed_from_u64(seed),
        };
        game.spawn_piece();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines
    }

    fn spawn_piece(&mut self) {
        let kind = PieceKind::ALL[self.rng.random_range(0..PieceKind::ALL.len())];
        let piece = Piece::spawn(kind, self.board.width());
        if self.board.collides(&piece, 0, 0) {
            tracing::debug!(score = self.score, "blocks: spawn blocked, game over");
            self.game_over = true;
        }
        self.piece = Some(piece);
    }

    fn try_shift(&mut self, dx: i32, dy: i32) -> bool {
        let Some(piece) = self.piece.as_mut() else {
            return false;
        };
        if self.board.collides(piece, dx, dy) {
            return false;
        }
        piece.x += dx;
        piece.y += dy;
        true
    }

    fn rotate(&mut self) {
        let Some(piece) = self.piece.as_ref() else {
            return;
        };
        let rotated = Piece {
            shape: rotate_clockwise(&piece.shape),
            ..piece.clone()
        };
        if !self.board.collides(&rotated, 0, 0) {
            self.piece = Some(rotated);
        }
    }

    /// One gravity step: fall a row, or settle, clear lines and spawn.
    fn gravity_step(&mut self) {
        if self.try_shift(0, 1) {
            return;
        }
        if let Some(piece) = self.piece.take() {
            self.board.merge(&piece);
        }
        let cleared = self.board.clear_full_lines();
        if cleared > 0 {
            self.lines += cleared;
            self.score += cleared * self.config.line_score;
        }
        self.spawn_piece();
    }

    fn block_size(&self, painter: &dyn Painter) -> f64 {
        let (w, h) = painter.buffer_size();
        (w / self.board.width() as f64).min(h / self.board.height() as f64)
    }
}

fn draw_cell(painter: &mut dyn Painter, size: f64, x: i32, y: i32, color: &str) {
    painter.fill_rect(
        f64::from(x) * size,
        f64::from(y) * size,
        size - 1.0,
        size - 1.0,
        color,
    );
}

impl CanvasGame for BlocksGame {
    fn update(&mut self, dt_ms: f64) {
        if self.game_over {
            return;
        }
        self.drop_timer_ms += dt_ms;
        if self.drop_timer_ms > self.config.drop_interval_ms {
            self.drop_timer_ms = 0.0;
            self.gravity_step();
        }
    }

    fn key_down(&mut self, key: Key) -> bool {
        if self.game_over {
            if key == Key::Restart {
                self.restart();
                return true;
            }
            return false;
        }
        match key {
            Key::ArrowLeft => {
                self.try_shift(-1, 0);
            },
            Key::ArrowRight => {
                self.try_shift(1, 0);
            },
            Key::ArrowDown => {
                if self.try_shift(0, 1) {
                    self.score += self.config.soft_drop_score;
                }
            },
            Key::ArrowUp | Key::Space => self.rotate(),
            Key::Restart | Key::Other => return false,
        }
        true
    }

    fn draw(&self, painter: &mut dyn Painter) {
        hud::clear(painter);
        let size = self.block_size(painter);
        for (x, y, kind) in self.board.filled_cells() {
            draw_cell(painter, size, x as i32, y as i32, kind.color());
        }
        if let Some(piece) = &self.piece {
            for (x, y) in piece.cells_at(0, 0) {
                draw_cell(painter, size, x, y, piece.kind.color());
            }
        }

        hud::status_line(painter, 0, &format!("Score: {}", self.score));
        if self.game_over {
            hud::game_over_banner(painter);
        }
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn is_game_over(&self) -> bool {
        self.game_over
    }

    fn restart(&mut self) {
        self.board = Board::new(self.config.grid_width, self.config.grid_height);
        self.score = 0;
        self.lines = 0;
        self.game_over = false;
        self.drop_timer_ms = 0.0;
        self.spawn_piece();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use winter_core::test_helpers::{self, RecordingPainter};

    fn new_game() -> BlocksGame {
        BlocksGame::new(BlocksConfig::default(), 42)
    }

    /// Drop pieces straight down until the stack reaches the top.
    fn play_until_over(game: &mut BlocksGame) {
        for _ in 0..10_000 {
            if game.is_game_over() {
                return;
            }
            game.update(1001.0);
        }
        panic!("stack never reached the top");
    }

    #[test]
    fn contract_fresh_game() {
        test_helpers::contract_fresh_game_draws_score(&new_game());
    }

    #[test]
    fn contract_arrow_keys() {
        test_helpers::contract_arrow_keys_consumed(&mut new_game());
    }

    #[test]
    fn contract_restart_after_game_over() {
        let mut game = new_game();
        play_until_over(&mut game);
        test_helpers::contract_game_over_then_restart(&mut game);
        assert_eq!(game.board().filled_cells().count(), 0);
    }

    #[test]
    fn gravity_waits_for_interval() {
        let mut game = new_game();
        let start = game.piece().unwrap().y;
        game.update(999.0);
        assert_eq!(game.piece().unwrap().y, start);
        game.update(2.0);
        assert_eq!(game.piece().unwrap().y, start + 1);
    }

    #[test]
    fn soft_drop_scores_a_point() {
        let mut game = new_game();
        assert!(game.key_down(Key::ArrowDown));
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn horizontal_moves_stop_at_walls() {
        let mut game = new_game();
        for _ in 0..20 {
            game.key_down(Key::ArrowLeft);
        }
        let leftmost = game.piece().unwrap().cells_at(0, 0).map(|(x, _)| x).min();
        assert_eq!(leftmost, Some(0));
        for _ in 0..20 {
            game.key_down(Key::ArrowRight);
        }
        let rightmost = game.piece().unwrap().cells_at(0, 0).map(|(x, _)| x).max();
        assert_eq!(rightmost, Some(9));
    }

    #[test]
    fn settled_piece_is_merged_and_replaced() {
        let mut game = new_game();
        for _ in 0..25 {
            game.update(1001.0);
        }
        assert!(game.board().filled_cells().count() >= 4);
        assert!(game.piece().is_some());
    }

    #[test]
    fn completing_a_line_scores() {
        let mut game = new_game();
        let bottom = game.board.height() - 1;
        game.board.fill_row_except(bottom, Some(0));
        // Vertical I piece dropped into the gap at column 0.
        game.piece = Some(Piece {
            kind: PieceKind::I,
            shape: vec![vec![true]; 4],
            x: 0,
            y: 0,
        });
        for _ in 0..30 {
            game.update(1001.0);
            if game.lines_cleared() > 0 {
                break;
            }
        }
        assert_eq!(game.lines_cleared(), 1);
        assert_eq!(game.score(), 100);
    }

    #[test]
    fn draw_uses_piece_colours() {
        let game = new_game();
        let mut painter = RecordingPainter::default();
        game.draw(&mut painter);
        let kind = game.piece().unwrap().kind;
        assert_eq!(painter.rects_in(kind.color()), 4);
    }

    #[test]
    fn same_seed_same_pieces() {
        let mut a = new_game();
        let mut b = new_game();
        for _ in 0..40 {
            a.update(1001.0);
            b.update(1001.0);
        }
        assert_eq!(a.board(), b.board());
        assert_eq!(a.piece(), b.piece());
    }

    proptest! {
        #[test]
        fn piece_never_leaves_board(keys in proptest::collection::vec(0u8..5, 0..200), seed in any::<u64>()) {
            let mut game = BlocksGame::new(BlocksConfig::default(), seed);
            for k in keys {
                let key = match k {
                    0 => Key::ArrowLeft,
                    1 => Key::ArrowRight,
                    2 => Key::ArrowDown,
                    3 => Key::ArrowUp,
                    _ => { game.update(1001.0); continue; }
                };
                game.key_down(key);
                if let Some(piece) = game.piece() && !game.is_game_over() {
                    for (x, y) in piece.cells_at(0, 0) {
                        prop_assert!((0..10).contains(&x));
                        prop_assert!(y < 20);
                    }
                }
            }
        }
    }
}
