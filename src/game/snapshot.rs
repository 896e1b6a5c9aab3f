//! Read-only view of the game handed to renderers each frame

use serde::Serialize;

use super::action::Direction;
use super::clock::Millis;
use super::effects::EffectKind;
use super::state::{DecorationGrid, GameState, Phase, Position};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerUpView {
    pub position: Position,
    pub kind: EffectKind,
    pub age_ms: Millis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub grid_width: usize,
    pub grid_height: usize,
    /// Head first
    pub snake: Vec<Position>,
    pub direction: Direction,
    pub food: Position,
    pub power_ups: Vec<PowerUpView>,
    pub active_effects: Vec<EffectKind>,
    pub score: u32,
    pub level: u32,
    pub speed: u32,
    pub phase: Phase,
    #[serde(skip)]
    pub decorations: DecorationGrid,
}

impl Snapshot {
    pub fn capture(state: &GameState, now: Millis) -> Self {
        Self {
            grid_width: state.grid_width,
            grid_height: state.grid_height,
            snake: state.snake.cells().copied().collect(),
            direction: state.snake.direction,
            food: state.food,
            power_ups: state
                .power_ups
                .iter()
                .map(|p| PowerUpView {
                    position: p.position,
                    kind: p.kind,
                    age_ms: p.age(now),
                })
                .collect(),
            active_effects: state.effects.active_kinds(now),
            score: state.score,
            level: state.level,
            speed: state.current_speed,
            phase: state.phase,
            decorations: state.decorations.clone(),
        }
    }

    pub fn head(&self) -> Position {
        self.snake[0]
    }

    pub fn is_effect_active(&self, kind: EffectKind) -> bool {
        self.active_effects.contains(&kind)
    }

    pub fn power_up_at(&self, pos: Position) -> Option<&PowerUpView> {
        self.power_ups.iter().find(|p| p.position == pos)
    }
}
