use serde::{Deserialize, Serialize};

/// Tick rate a fresh game starts at (ticks per second)
pub const BASE_SPEED: u32 = 8;
/// Lowest tick rate the Slow effect can drop to
pub const MIN_SPEED: u32 = 3;
/// Highest base tick rate reachable through level-ups
pub const MAX_SPEED: u32 = 15;
pub const SPEED_BONUS: u32 = 4;
pub const SLOW_PENALTY: u32 = 3;

/// How long an uncollected power-up stays on the board
pub const POWER_UP_LIFESPAN_MS: u64 = 10_000;
/// How long a collected power-up's effect lasts
pub const EFFECT_DURATION_MS: u64 = 5_000;

pub const BASE_POWER_UP_CHANCE: f64 = 0.15;
pub const POWER_UP_CHANCE_PER_LEVEL: f64 = 0.03;
pub const MAX_POWER_UP_CHANCE: f64 = 0.5;

/// A level-up fires whenever the score lands exactly on a multiple of this
pub const LEVEL_UP_SCORE: u32 = 50;
pub const FOOD_SCORE: u32 = 10;
pub const SCORE_BOOST_MULTIPLIER: u32 = 2;

pub const DEFAULT_GRID_SIZE: usize = 30;
/// Pixel size of one cell, only meaningful to pixel renderers
pub const CELL_SIZE: u32 = 20;
/// Decoration values are drawn from `0..=DECORATION_MAX`
pub const DECORATION_MAX: u8 = 10;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Seed for the spawner; `None` seeds from OS entropy
    pub seed: Option<u64>,
    /// Random draws before a spawn falls back to scanning for a free cell
    pub max_spawn_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE, DEFAULT_GRID_SIZE)
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            seed: None,
            max_spawn_attempts: 4 * width * height,
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 30);
        assert_eq!(config.seed, None);
        assert_eq!(config.max_spawn_attempts, 3600);
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12).with_seed(7);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
        assert_eq!(config.max_spawn_attempts, 720);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_speed_bounds_are_consistent() {
        assert!(MIN_SPEED <= BASE_SPEED && BASE_SPEED <= MAX_SPEED);
        assert!(BASE_POWER_UP_CHANCE < MAX_POWER_UP_CHANCE);
    }
}
