use serde::{Deserialize, Serialize};

/// Data-driven tuning for the Blocks game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlocksConfig {
    /// Board width in cells.
    pub grid_width: usize,
    /// Board height in cells.
    pub grid_height: usize,
    /// Gravity step interval (ms).
    pub drop_interval_ms: f64,
    /// Points per cleared line.
    pub line_score: u32,
    /// Points per cell of soft drop.
    pub soft_drop_score: u32,
}

impl Default for BlocksConfig {
    fn default() -> Self {
        Self {
            grid_width: 10,
            grid_height: 20,
            drop_interval_ms: 1000.0,
            line_score: 100,
            soft_drop_score: 1,
        }
    }
}

impl BlocksConfig {
    /// Parse tuning from TOML. Missing keys keep their defaults; degenerate
    /// board sizes are raised to the smallest playable board.
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(contents)?;
        if config.grid_width < 4 || config.grid_height < 4 {
            tracing::warn!(
                width = config.grid_width,
                height = config.grid_height,
                "blocks board too small, clamping to 4x4"
            );
            config.grid_width = config.grid_width.max(4);
            config.grid_height = config.grid_height.max(4);
        }
        Ok(config)
    }
}
