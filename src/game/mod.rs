//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Time comes in as an explicit millisecond value and randomness from a seedable
//! spawner, so a game is fully reproducible from its seed and inputs.

pub mod action;
pub mod clock;
pub mod config;
pub mod effects;
pub mod engine;
pub mod power_up;
pub mod snapshot;
pub mod spawner;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use clock::{Clock, ManualClock, Millis, SystemClock};
pub use config::GameConfig;
pub use effects::{ActiveEffects, EffectKind};
pub use engine::{GameEngine, StepInfo, StepResult, effective_speed, tick_period_ms};
pub use power_up::PowerUp;
pub use snapshot::{PowerUpView, Snapshot};
pub use spawner::Spawner;
pub use state::{DecorationGrid, GameState, Phase, Position, Snake};
