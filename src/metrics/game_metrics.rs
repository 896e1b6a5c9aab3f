//! In-memory session statistics; nothing here outlives the process

use std::time::{Duration, Instant};

use crate::game::StepInfo;

pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    /// Best score seen this session
    pub session_best: u32,
    pub games_played: u32,
    pub food_eaten: u32,
    pub power_ups_collected: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            session_best: 0,
            games_played: 0,
            food_eaten: 0,
            power_ups_collected: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.food_eaten = 0;
        self.power_ups_collected = 0;
    }

    pub fn on_step(&mut self, info: &StepInfo) {
        if info.ate_food {
            self.food_eaten += 1;
        }
        self.power_ups_collected += info.collected.len() as u32;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.session_best {
            self.session_best = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::EffectKind;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_session_best_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(10);
        assert_eq!(metrics.session_best, 10);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_over(5);
        assert_eq!(metrics.session_best, 10); // Should not decrease
        assert_eq!(metrics.games_played, 2);

        metrics.on_game_over(15);
        assert_eq!(metrics.session_best, 15); // Should update
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_step_counters() {
        let mut metrics = GameMetrics::new();
        metrics.on_step(&StepInfo {
            ate_food: true,
            collected: vec![EffectKind::Speed, EffectKind::ScoreBoost],
            ..StepInfo::default()
        });
        metrics.on_step(&StepInfo::default());
        assert_eq!(metrics.food_eaten, 1);
        assert_eq!(metrics.power_ups_collected, 2);

        metrics.on_game_start();
        assert_eq!(metrics.food_eaten, 0);
        assert_eq!(metrics.power_ups_collected, 0);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();

        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_game_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }
}
