use serde::{Deserialize, Serialize};

/// Data-driven tuning for the Snake game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    /// Tiles per side of the square arena.
    pub tile_count: i32,
    /// Initial interval between moves (ms).
    pub step_ms: f64,
    /// Fastest allowed move interval (ms).
    pub min_step_ms: f64,
    /// Interval reduction per food eaten (ms).
    pub speedup_ms: f64,
    /// Points per food eaten.
    pub food_score: u32,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            tile_count: 25,
            step_ms: 100.0,
            min_step_ms: 50.0,
            speedup_ms: 1.0,
            food_score: 10,
        }
    }
}

impl SnakeConfig {
    /// Parse tuning from TOML. Missing keys keep their defaults; an arena
    /// smaller than 5x5 is raised to 5x5.
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(contents)?;
        if config.tile_count < 5 {
            tracing::warn!(tile_count = config.tile_count, "snake arena too small, clamping to 5");
            config.tile_count = 5;
        }
        if config.min_step_ms > config.step_ms {
            config.min_step_ms = config.step_ms;
        }
        Ok(config)
    }
}
