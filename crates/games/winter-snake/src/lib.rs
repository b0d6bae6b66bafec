pub mod arena;
pub mod config;

use std::collections::VecDeque;

use rand::SeedableRng;
use rand::rngs::StdRng;

use winter_core::game_trait::{CanvasGame, Key, Painter};
use winter_core::hud;

use arena::{Direction, Tile, spawn_food};
pub use config::SnakeConfig;

/// Classic snake on a square tile arena. The snake moves one tile per step,
/// grows on food and speeds up slightly each time it eats.
pub struct SnakeGame {
    config: SnakeConfig,
    body: VecDeque<Tile>,
    direction: Direction,
    next_direction: Direction,
    food: Option<Tile>,
    score: u32,
    game_over: bool,
    step_ms: f64,
    since_step_ms: f64,
    rng: StdRng,
}

impl SnakeGame {
    pub fn new(config: SnakeConfig, seed: u64) -> Self {
        let mut game = Self {
            step_ms: config.step_ms,
            config,
            body: VecDeque::new(),
            direction: Direction::Right,
            next_direction: Direction::Right,
            food: None,
            score: 0,
            game_over: false,
            since_step_ms: 0.0,
            rng: StdRng::seed_from_u64(seed),
        };
        game.reset_round();
        game
    }

    pub fn body(&self) -> &VecDeque<Tile> {
        &self.body
    }

    pub fn head(&self) -> Option<Tile> {
        self.body.front().copied()
    }

    pub fn food(&self) -> Option<Tile> {
        self.food
    }

    pub fn step_interval_ms(&self) -> f64 {
        self.step_ms
    }

    fn reset_round(&mut self) {
        let mid = self.config.tile_count / 2;
        self.body = VecDeque::from([Tile::new(mid, mid)]);
        self.direction = Direction::Right;
        self.next_direction = Direction::Right;
        self.score = 0;
        self.game_over = false;
        self.step_ms = self.config.step_ms;
        self.since_step_ms = 0.0;
        self.food = spawn_food(&self.body, self.config.tile_count, &mut self.rng);
    }

    /// Advance one tile in the queued direction.
    fn step(&mut self) {
        self.direction = self.next_direction;
        let Some(head) = self.head() else {
            return;
        };
        let next = self.direction.step(head);

        if !next.in_arena(self.config.tile_count) || self.body.contains(&next) {
            tracing::debug!(score = self.score, length = self.body.len(), "snake crashed");
            self.game_over = true;
            return;
        }

        self.body.push_front(next);
        if self.food == Some(next) {
            self.score += self.config.food_score;
            self.step_ms = (self.step_ms - self.config.speedup_ms).max(self.config.min_step_ms);
            self.food = spawn_food(&self.body, self.config.tile_count, &mut self.rng);
            if self.food.is_none() {
                tracing::debug!(score = self.score, "snake filled the arena");
                self.game_over = true;
            }
        } else {
            self.body.pop_back();
        }
    }

    fn turn(&mut self, to: Direction) {
        if self.direction.can_turn_to(to) {
            self.next_direction = to;
        }
    }

    fn tile_size(&self, painter: &dyn Painter) -> f64 {
        let (w, h) = painter.buffer_size();
        w.min(h) / f64::from(self.config.tile_count)
    }
}

impl CanvasGame for SnakeGame {
    fn update(&mut self, dt_ms: f64) {
        if self.game_over {
            return;
        }
        self.since_step_ms += dt_ms;
        if self.since_step_ms < self.step_ms {
            return;
        }
        self.since_step_ms = 0.0;
        self.step();
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
            Key::ArrowLeft => self.turn(Direction::Left),
            Key::ArrowRight => self.turn(Direction::Right),
            Key::ArrowUp => self.turn(Direction::Up),
            Key::ArrowDown => self.turn(Direction::Down),
            Key::Space | Key::Restart | Key::Other => return false,
        }
        true
    }

    fn draw(&self, painter: &mut dyn Painter) {
        hud::clear(painter);
        let size = self.tile_size(painter);
        let extent = size * f64::from(self.config.tile_count);

        for i in 0..=self.config.tile_count {
            let offset = f64::from(i) * size;
            painter.stroke_line((offset, 0.0), (offset, extent), 0.5, hud::GRID_LINE);
            painter.stroke_line((0.0, offset), (extent, offset), 0.5, hud::GRID_LINE);
        }

        for (index, segment) in self.body.iter().enumerate() {
            let color = if index == 0 { hud::HIGHLIGHT } else { hud::GOLD };
            painter.fill_rect(
                f64::from(segment.x) * size + 1.0,
                f64::from(segment.y) * size + 1.0,
                size - 2.0,
                size - 2.0,
                color,
            );
        }

        if let Some(food) = self.food {
            painter.fill_circle(
                f64::from(food.x) * size + size / 2.0,
                f64::from(food.y) * size + size / 2.0,
                size / 2.0 - 2.0,
                hud::RED,
            );
        }

        hud::status_line(painter, 0, &format!("Score: {}", self.score));
        hud::status_line(painter, 1, &format!("Length: {}", self.body.len()));
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
        self.reset_round();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use winter_core::test_helpers::{self, RecordingPainter, run_frames};

    fn new_game() -> SnakeGame {
        SnakeGame::new(SnakeConfig::default(), 7)
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
    fn contract_restart_after_crash() {
        let mut game = new_game();
        run_frames(&mut game, 100, 100.0);
        assert!(game.is_game_over(), "heading right must hit the wall");
        test_helpers::contract_game_over_then_restart(&mut game);
        assert_eq!(game.body().len(), 1);
        assert_eq!(game.head(), Some(Tile::new(12, 12)));
    }

    #[test]
    fn moves_once_per_interval() {
        let mut game = new_game();
        game.update(99.0);
        assert_eq!(game.head(), Some(Tile::new(12, 12)));
        game.update(1.0);
        assert_eq!(game.head(), Some(Tile::new(13, 12)));
    }

    #[test]
    fn reversing_is_ignored() {
        let mut game = new_game();
        game.key_down(Key::ArrowLeft);
        game.update(100.0);
        assert_eq!(game.head(), Some(Tile::new(13, 12)));
    }

    #[test]
    fn turn_applies_on_next_step() {
        let mut game = new_game();
        game.key_down(Key::ArrowUp);
        game.update(100.0);
        assert_eq!(game.head(), Some(Tile::new(12, 11)));
    }

    #[test]
    fn eating_grows_scores_and_speeds_up() {
        let mut game = new_game();
        game.food = Some(Tile::new(13, 12));
        game.update(100.0);
        assert_eq!(game.score(), 10);
        assert_eq!(game.body().len(), 2);
        assert!((game.step_interval_ms() - 99.0).abs() < f64::EPSILON);
        let food = game.food().unwrap();
        assert!(!game.body().contains(&food));
    }

    #[test]
    fn speed_is_floored() {
        let config = SnakeConfig {
            step_ms: 50.5,
            ..SnakeConfig::default()
        };
        let mut game = SnakeGame::new(config, 1);
        game.food = Some(Tile::new(13, 12));
        game.update(100.0);
        assert!((game.step_interval_ms() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn running_into_itself_ends_game() {
        let mut game = new_game();
        game.body = VecDeque::from([
            Tile::new(5, 5),
            Tile::new(4, 5),
            Tile::new(4, 6),
            Tile::new(5, 6),
            Tile::new(6, 6),
        ]);
        game.food = Some(Tile::new(0, 0));
        game.key_down(Key::ArrowDown);
        game.update(100.0);
        assert!(game.is_game_over());
    }

    #[test]
    fn draw_highlights_head_and_food() {
        let game = new_game();
        let mut painter = RecordingPainter::default();
        game.draw(&mut painter);
        assert_eq!(painter.rects_in(hud::HIGHLIGHT), 1);
        assert!(painter.texts().contains(&"Length: 1"));
        assert!(
            painter
                .ops
                .iter()
                .any(|op| matches!(op, test_helpers::DrawOp::Circle { .. }))
        );
    }

    proptest! {
        #[test]
        fn body_stays_in_arena(keys in proptest::collection::vec(0u8..4, 0..300), seed in any::<u64>()) {
            let mut game = SnakeGame::new(SnakeConfig::default(), seed);
            for k in keys {
                let key = match k {
                    0 => Key::ArrowLeft,
                    1 => Key::ArrowRight,
                    2 => Key::ArrowUp,
                    _ => Key::ArrowDown,
                };
                game.key_down(key);
                game.update(100.0);
                prop_assert!(game.body().iter().all(|t| t.in_arena(25)));
                let unique: std::collections::HashSet<_> = game.body().iter().collect();
                prop_assert_eq!(unique.len(), game.body().len());
            }
        }
    }
}
