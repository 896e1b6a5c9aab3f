use tracing::{debug, info};

use super::{
    action::Direction,
    clock::Millis,
    config::{
        BASE_POWER_UP_CHANCE, FOOD_SCORE, GameConfig, LEVEL_UP_SCORE, MAX_SPEED, MIN_SPEED,
        SCORE_BOOST_MULTIPLIER, SLOW_PENALTY, SPEED_BONUS,
    },
    effects::{ActiveEffects, EffectKind},
    spawner::{Spawner, power_up_chance},
    state::{GameState, Phase, Position, Snake},
};
use crate::input::IntentQueue;

/// Information about a step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Whether eating pushed the game to a new level
    pub leveled_up: bool,
    /// Kind of power-up spawned after eating, if any
    pub spawned_power_up: Option<EffectKind>,
    /// Power-ups picked up by the head this step
    pub collected: Vec<EffectKind>,
    /// Power-ups that timed out this step
    pub expired: usize,
    /// Whether the head ran into the body
    pub self_collision: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the simulation advanced this call
    pub advanced: bool,
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn idle(state: &GameState) -> Self {
        Self {
            advanced: false,
            terminated: state.is_game_over(),
            info: StepInfo::default(),
        }
    }
}

/// Tick rate for the next tick given the base rate and running effects
pub fn effective_speed(base_speed: u32, effects: &ActiveEffects, now: Millis) -> u32 {
    if effects.is_active(EffectKind::Speed, now) {
        base_speed + SPEED_BONUS
    } else if effects.is_active(EffectKind::Slow, now) {
        base_speed.saturating_sub(SLOW_PENALTY).max(MIN_SPEED)
    } else {
        base_speed
    }
}

/// Milliseconds between ticks at `speed` ticks per second
pub fn tick_period_ms(speed: u32) -> Millis {
    1_000 / Millis::from(speed.max(1))
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    spawner: Spawner,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let spawner = Spawner::from_config(&config);
        Self { config, spawner }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Fresh game: one-cell snake in the centre heading right
    pub fn reset(&mut self) -> GameState {
        let center = Position::new(
            (self.config.grid_width / 2) as i32,
            (self.config.grid_height / 2) as i32,
        );
        let snake = Snake::new(center, Direction::Right, 1);

        let food = self.spawner.spawn_food(&snake, &[]).unwrap_or(center);
        let mut state = GameState::new(
            snake,
            food,
            self.config.grid_width,
            self.config.grid_height,
        );
        state.decorations = self.spawner.decorations();

        info!(
            width = state.grid_width,
            height = state.grid_height,
            "new game"
        );
        state
    }

    /// Restart from GameOver; ignored in any other phase
    pub fn restart(&mut self, state: &mut GameState, intents: &mut IntentQueue) -> bool {
        if !state.is_game_over() {
            return false;
        }
        *state = self.reset();
        intents.clear();
        true
    }

    /// Flip between Running and Paused; ignored in GameOver
    pub fn toggle_pause(&self, state: &mut GameState) -> bool {
        state.phase = match state.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            Phase::GameOver => return false,
        };
        debug!(phase = ?state.phase, "pause toggled");
        true
    }

    /// Advance the simulation by one grid step, consuming at most one
    /// queued intent. Does nothing unless the game is running.
    pub fn step(
        &mut self,
        state: &mut GameState,
        intents: &mut IntentQueue,
        now: Millis,
    ) -> StepResult {
        if !state.is_running() {
            return StepResult::idle(state);
        }

        let mut info = StepInfo::default();

        // Commit-time guard against 180° turns
        if let Some(next) = intents.dequeue_one() {
            if !state.snake.direction.is_opposite(next) {
                state.snake.direction = next;
            }
        }

        state.current_speed = effective_speed(state.base_speed, &state.effects, now);

        let new_head = state
            .snake
            .head()
            .moved_in_direction(state.snake.direction)
            .wrapped(state.grid_width, state.grid_height);

        if !state.effects.is_active(EffectKind::Invincibility, now)
            && state.snake.contains(new_head)
        {
            state.phase = Phase::GameOver;
            state.steps += 1;
            info.self_collision = true;
            info!(score = state.score, level = state.level, "game over");
            return StepResult {
                advanced: true,
                terminated: true,
                info,
            };
        }

        state.snake.push_head(new_head);

        if new_head == state.food {
            self.eat_food(state, now, &mut info);
        }

        self.update_power_ups(state, new_head, now, &mut info);

        if state.grow_pending {
            state.grow_pending = false;
        } else {
            state.snake.pop_tail();
        }

        state.steps += 1;

        StepResult {
            advanced: true,
            terminated: false,
            info,
        }
    }

    fn eat_food(&mut self, state: &mut GameState, now: Millis, info: &mut StepInfo) {
        if let Some(food) = self.spawner.spawn_food(&state.snake, &state.power_ups) {
            state.food = food;
        }

        let multiplier = if state.effects.is_active(EffectKind::ScoreBoost, now) {
            SCORE_BOOST_MULTIPLIER
        } else {
            1
        };
        state.score += FOOD_SCORE * multiplier;
        info.ate_food = true;

        // Only an exact multiple levels up; a boosted jump can skip one
        if state.score % LEVEL_UP_SCORE == 0 {
            state.level += 1;
            state.base_speed = (state.base_speed + 1).min(MAX_SPEED);
            info.leveled_up = true;
            info!(level = state.level, base_speed = state.base_speed, "level up");
        }

        // Gate the spawn attempt; the spawner rolls again for placement
        if self.spawner.roll() < power_up_chance(state.level, BASE_POWER_UP_CHANCE) {
            if let Some(power_up) = self.spawner.maybe_spawn_power_up(
                &state.snake,
                state.food,
                &state.power_ups,
                state.level,
                now,
            ) {
                debug!(
                    kind = ?power_up.kind,
                    x = power_up.position.x,
                    y = power_up.position.y,
                    "power-up spawned"
                );
                info.spawned_power_up = Some(power_up.kind);
                state.power_ups.push(power_up);
            }
        }

        state.grow_pending = true;
        debug!(score = state.score, length = state.snake.len(), "food eaten");
    }

    fn update_power_ups(
        &self,
        state: &mut GameState,
        head: Position,
        now: Millis,
        info: &mut StepInfo,
    ) {
        let effects = &mut state.effects;
        state.power_ups.retain(|power_up| {
            if power_up.position == head {
                effects.activate(power_up.kind, now);
                info.collected.push(power_up.kind);
                debug!(kind = ?power_up.kind, "power-up collected");
                false
            } else if power_up.is_expired(now) {
                info.expired += 1;
                debug!(kind = ?power_up.kind, age = power_up.age(now), "power-up expired");
                false
            } else {
                true
            }
        });
    }
}
