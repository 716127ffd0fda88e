use serde::{Deserialize, Serialize};

use crate::BoundaryMode;

/// Data-driven configuration for one game instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    /// Board is `grid_size` x `grid_size` cells.
    pub grid_size: u32,
    /// Inter-tick delay at game start (ms).
    pub initial_tick_ms: u32,
    /// How much the inter-tick delay shrinks per food eaten (ms).
    pub speed_decrement_ms: u32,
    /// Floor for the inter-tick delay (ms).
    pub min_tick_ms: u32,
    /// Score awarded per food eaten.
    pub food_reward: u32,
    /// What happens at the board edge.
    pub mode: BoundaryMode,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_tick_ms: 150,
            speed_decrement_ms: 2,
            min_tick_ms: 50,
            food_reward: 10,
            mode: BoundaryMode::Walls,
        }
    }
}

impl SnakeConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("NEONSNAKE_GAME_CONFIG")
            && let Ok(contents) = std::fs::read_to_string(&path)
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        if let Ok(contents) = std::fs::read_to_string("config/game.toml")
            && let Ok(config) = toml::from_str::<Self>(&contents)
        {
            return config;
        }
        Self::default()
    }
}
