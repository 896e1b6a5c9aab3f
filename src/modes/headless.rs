//! Scripted run without a terminal UI
//!
//! Each tick consumes one script character: `U`/`D`/`L`/`R` queue a turn,
//! `P` toggles pause, anything else sends no input. Time is simulated, so a
//! seeded run always produces the same final snapshot.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::game::{
    Clock, Direction, GameConfig, GameEngine, ManualClock, Snapshot, tick_period_ms,
};
use crate::input::IntentQueue;
use crate::metrics::GameMetrics;

/// Configuration for headless mode
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    pub game_config: GameConfig,
    /// Upper bound on ticks; the run also stops at game over
    pub ticks: u32,
    pub script: String,
    /// Where to write the final snapshot; stdout when unset
    pub output: Option<PathBuf>,
}

impl HeadlessConfig {
    pub fn new(game_config: GameConfig, ticks: u32) -> Self {
        Self {
            game_config,
            ticks,
            script: String::new(),
            output: None,
        }
    }

    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = script.into();
        self
    }
}

pub struct HeadlessMode {
    config: HeadlessConfig,
    metrics: GameMetrics,
}

impl HeadlessMode {
    pub fn new(config: HeadlessConfig) -> Self {
        Self {
            config,
            metrics: GameMetrics::new(),
        }
    }

    /// Play the script and return the final snapshot
    pub fn play(&mut self) -> Snapshot {
        let mut engine = GameEngine::new(self.config.game_config.clone());
        let mut state = engine.reset();
        let mut intents = IntentQueue::new();
        let clock = ManualClock::new(0);
        let mut script = self.config.script.chars();

        for _ in 0..self.config.ticks {
            match script.next() {
                Some('P') | Some('p') => {
                    engine.toggle_pause(&mut state);
                }
                Some(c) => {
                    if let Some(direction) = Direction::from_script_char(c) {
                        intents.enqueue(direction, state.snake.direction, state.is_paused());
                    }
                }
                None => {}
            }

            let result = engine.step(&mut state, &mut intents, clock.now());
            self.metrics.on_step(&result.info);
            if result.terminated {
                self.metrics.on_game_over(state.score);
                break;
            }

            clock.advance(tick_period_ms(state.current_speed));
        }

        info!(
            score = state.score,
            level = state.level,
            length = state.snake.len(),
            steps = state.steps,
            food = self.metrics.food_eaten,
            power_ups = self.metrics.power_ups_collected,
            "headless run finished"
        );
        Snapshot::capture(&state, clock.now())
    }

    /// Play the script and write the final snapshot as JSON
    pub fn run(&mut self) -> Result<Snapshot> {
        let snapshot = self.play();
        match &self.config.output {
            Some(path) => write_snapshot_file(&snapshot, path)?,
            None => write_snapshot(&snapshot, io::stdout().lock())?,
        }
        Ok(snapshot)
    }
}

pub fn write_snapshot(snapshot: &Snapshot, mut writer: impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, snapshot).context("Failed to serialize snapshot")?;
    writeln!(writer).context("Failed to write snapshot")?;
    writer.flush().context("Failed to flush snapshot")?;
    Ok(())
}

fn write_snapshot_file(snapshot: &Snapshot, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_snapshot(snapshot, BufWriter::new(file))
}
