use std::collections::VecDeque;

use rand::Rng;

/// Tile coordinate, `(0, 0)` at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
}

impl Tile {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn in_arena(self, tile_count: i32) -> bool {
        (0..tile_count).contains(&self.x) && (0..tile_count).contains(&self.y)
    }
}

/// Heading of the snake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Turns are only allowed at right angles to the current heading.
    pub fn can_turn_to(self, next: Direction) -> bool {
        self.is_horizontal() != next.is_horizontal()
    }

    pub fn step(self, from: Tile) -> Tile {
        let (dx, dy) = self.delta();
        Tile::new(from.x + dx, from.y + dy)
    }
}

/// Pick a random tile not covered by `body`. `None` when the arena is full.
pub fn spawn_food(body: &VecDeque<Tile>, tile_count: i32, rng: &mut impl Rng) -> Option<Tile> {
    let free: Vec<Tile> = (0..tile_count)
        .flat_map(|y| (0..tile_count).map(move |x| Tile::new(x, y)))
        .filter(|tile| !body.contains(tile))
        .collect();
    if free.is_empty() {
        return None;
    }
    Some(free[rng.random_range(0..free.len())])
}
