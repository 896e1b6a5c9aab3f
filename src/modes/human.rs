use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, sleep_until};
use tracing::info;

use crate::game::{
    Clock, GameConfig, GameEngine, GameState, Snapshot, SystemClock, tick_period_ms,
};
use crate::input::{InputHandler, IntentQueue, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    intents: IntentQueue,
    clock: SystemClock,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Self {
            engine,
            state,
            intents: IntentQueue::new(),
            clock: SystemClock::new(),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut next_tick = Instant::now() + self.tick_period();

        self.draw(terminal)?;

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick, paced by the current speed
                _ = sleep_until(next_tick) => {
                    self.update_game();
                    next_tick += self.tick_period();
                    // Don't try to catch up after a stall
                    let now = Instant::now();
                    if next_tick < now {
                        next_tick = now + self.tick_period();
                    }
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            self.draw(terminal)?;
        }

        info!(
            best = self.metrics.session_best,
            games = self.metrics.games_played,
            "leaving interactive session"
        );
        Ok(())
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        self.metrics.update();
        let snapshot = Snapshot::capture(&self.state, self.clock.now());
        terminal
            .draw(|frame| {
                self.renderer.render(frame, &snapshot, &self.metrics);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn tick_period(&self) -> Duration {
        Duration::from_millis(tick_period_ms(self.state.current_speed))
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            self.apply_key_action(self.input_handler.handle_key_event(key));
        }
    }

    fn apply_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Turn(direction) => {
                if self.state.is_game_over() {
                    return;
                }
                // Held keys autorepeat; a repeat of the newest heading adds nothing
                let heading = self.intents.last().unwrap_or(self.state.snake.direction);
                if direction == heading {
                    return;
                }
                self.intents.enqueue(
                    direction,
                    self.state.snake.direction,
                    self.state.is_paused(),
                );
            }
            KeyAction::TogglePause => {
                self.engine.toggle_pause(&mut self.state);
            }
            KeyAction::Restart => {
                if self.engine.restart(&mut self.state, &mut self.intents) {
                    self.metrics.on_game_start();
                }
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        let result = self
            .engine
            .step(&mut self.state, &mut self.intents, self.clock.now());

        self.metrics.on_step(&result.info);

        // Track game over
        if result.advanced && result.terminated {
            self.metrics.on_game_over(self.state.score);
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
