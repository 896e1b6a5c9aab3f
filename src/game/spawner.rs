//! Random placement of food, power-ups and background decoration
//!
//! All randomness in a game flows through one `Spawner`, so a seeded
//! spawner replays the same game for the same inputs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

use super::clock::Millis;
use super::config::{
    BASE_POWER_UP_CHANCE, DECORATION_MAX, GameConfig, MAX_POWER_UP_CHANCE,
    POWER_UP_CHANCE_PER_LEVEL,
};
use super::effects::EffectKind;
use super::power_up::PowerUp;
use super::state::{DecorationGrid, Position, Snake};

/// Chance that a power-up roll succeeds at `level`
pub fn power_up_chance(level: u32, base_chance: f64) -> f64 {
    (base_chance + level as f64 * POWER_UP_CHANCE_PER_LEVEL).min(MAX_POWER_UP_CHANCE)
}

pub struct Spawner<R: Rng = StdRng> {
    rng: R,
    grid_width: usize,
    grid_height: usize,
    max_attempts: usize,
}

impl Spawner<StdRng> {
    /// Seeded from `config.seed`, or from OS entropy when unset
    pub fn from_config(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(
            rng,
            config.grid_width,
            config.grid_height,
            config.max_spawn_attempts,
        )
    }
}

impl<R: Rng> Spawner<R> {
    pub fn with_rng(rng: R, grid_width: usize, grid_height: usize, max_attempts: usize) -> Self {
        Self {
            rng,
            grid_width,
            grid_height,
            max_attempts,
        }
    }

    /// Uniform random value in `[0, 1)`
    pub fn roll(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }

    /// Pick a free cell for food, avoiding the snake and every power-up
    pub fn spawn_food(&mut self, snake: &Snake, power_ups: &[PowerUp]) -> Option<Position> {
        let cell = self.free_cell(|pos| {
            snake.contains(pos) || power_ups.iter().any(|p| p.position == pos)
        });
        if cell.is_none() {
            warn!("no free cell left for food");
        }
        cell
    }

    /// Roll against the level-scaled chance and, on success, place a power-up
    /// of random kind on a cell clear of the snake, the food and other power-ups
    pub fn maybe_spawn_power_up(
        &mut self,
        snake: &Snake,
        food: Position,
        power_ups: &[PowerUp],
        level: u32,
        now: Millis,
    ) -> Option<PowerUp> {
        if self.roll() >= power_up_chance(level, BASE_POWER_UP_CHANCE) {
            return None;
        }

        let Some(position) = self.free_cell(|pos| {
            pos == food || snake.contains(pos) || power_ups.iter().any(|p| p.position == pos)
        }) else {
            warn!("no free cell left for a power-up");
            return None;
        };

        let kind = EffectKind::ALL[self.rng.gen_range(0..EffectKind::ALL.len())];
        Some(PowerUp::new(position, kind, now))
    }

    /// Fresh cosmetic background
    pub fn decorations(&mut self) -> DecorationGrid {
        let values: Vec<u8> = (0..self.grid_width * self.grid_height)
            .map(|_| self.rng.gen_range(0..=DECORATION_MAX))
            .collect();
        DecorationGrid::from_values(self.grid_width, self.grid_height, values)
    }

    /// Rejection-sample a cell for which `occupied` is false. After
    /// `max_attempts` misses, pick uniformly among the cells still free.
    fn free_cell(&mut self, occupied: impl Fn(Position) -> bool) -> Option<Position> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return None;
        }

        for _ in 0..self.max_attempts {
            let x = self.rng.gen_range(0..self.grid_width) as i32;
            let y = self.rng.gen_range(0..self.grid_height) as i32;
            let pos = Position::new(x, y);

            if !occupied(pos) {
                return Some(pos);
            }
        }

        let free: Vec<Position> = (0..self.grid_height as i32)
            .flat_map(|y| (0..self.grid_width as i32).map(move |x| Position::new(x, y)))
            .filter(|pos| !occupied(*pos))
            .collect();
        if free.is_empty() {
            None
        } else {
            Some(free[self.rng.gen_range(0..free.len())])
        }
    }
}
