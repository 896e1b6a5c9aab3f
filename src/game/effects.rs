//! Timed power-up effects
//!
//! Effects carry only an expiry timestamp. An effect is active while its
//! expiry is strictly later than `now`; nothing fires when it runs out.

use serde::{Deserialize, Serialize};

use super::clock::Millis;
use super::config::EFFECT_DURATION_MS;

/// The four kinds of timed power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    Speed,
    Slow,
    ScoreBoost,
    Invincibility,
}

impl EffectKind {
    pub const ALL: [EffectKind; 4] = [
        EffectKind::Speed,
        EffectKind::Slow,
        EffectKind::ScoreBoost,
        EffectKind::Invincibility,
    ];

    /// HUD label shown while the effect is running
    pub fn label(&self) -> &'static str {
        match self {
            EffectKind::Speed => "SPEED!",
            EffectKind::Slow => "SLOW!",
            EffectKind::ScoreBoost => "2X SCORE!",
            EffectKind::Invincibility => "INVINCIBLE!",
        }
    }
}

/// Expiry timestamp per effect kind, 0 when inactive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub speed: Millis,
    pub slow: Millis,
    pub score_boost: Millis,
    pub invincibility: Millis,
}

impl ActiveEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expiry(&self, kind: EffectKind) -> Millis {
        match kind {
            EffectKind::Speed => self.speed,
            EffectKind::Slow => self.slow,
            EffectKind::ScoreBoost => self.score_boost,
            EffectKind::Invincibility => self.invincibility,
        }
    }

    fn expiry_mut(&mut self, kind: EffectKind) -> &mut Millis {
        match kind {
            EffectKind::Speed => &mut self.speed,
            EffectKind::Slow => &mut self.slow,
            EffectKind::ScoreBoost => &mut self.score_boost,
            EffectKind::Invincibility => &mut self.invincibility,
        }
    }

    /// Start (or restart) `kind` for the standard effect duration
    pub fn activate(&mut self, kind: EffectKind, now: Millis) {
        self.activate_for(kind, now, EFFECT_DURATION_MS);
    }

    /// Start `kind` for `duration` ms. Speed and Slow cancel each other.
    pub fn activate_for(&mut self, kind: EffectKind, now: Millis, duration: Millis) {
        *self.expiry_mut(kind) = now.saturating_add(duration);
        match kind {
            EffectKind::Speed => self.slow = 0,
            EffectKind::Slow => self.speed = 0,
            EffectKind::ScoreBoost | EffectKind::Invincibility => {}
        }
    }

    pub fn is_active(&self, kind: EffectKind, now: Millis) -> bool {
        self.expiry(kind) > now
    }

    /// Kinds active at `now`, in declaration order
    pub fn active_kinds(&self, now: Millis) -> Vec<EffectKind> {
        EffectKind::ALL
            .into_iter()
            .filter(|kind| self.is_active(*kind, now))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_by_default() {
        let effects = ActiveEffects::new();
        for kind in EffectKind::ALL {
            assert!(!effects.is_active(kind, 0));
            assert_eq!(effects.expiry(kind), 0);
        }
    }

    #[test]
    fn test_activate_sets_expiry() {
        let mut effects = ActiveEffects::new();
        effects.activate(EffectKind::ScoreBoost, 1_000);
        assert_eq!(effects.score_boost, 6_000);
        assert!(effects.is_active(EffectKind::ScoreBoost, 5_999));
        // Expiry is exclusive
        assert!(!effects.is_active(EffectKind::ScoreBoost, 6_000));
    }

    #[test]
    fn test_speed_and_slow_are_exclusive() {
        let mut effects = ActiveEffects::new();
        effects.activate(EffectKind::Speed, 100);
        assert!(effects.is_active(EffectKind::Speed, 200));

        effects.activate(EffectKind::Slow, 200);
        assert_eq!(effects.speed, 0);
        assert_eq!(effects.slow, 5_200);

        effects.activate(EffectKind::Speed, 300);
        assert_eq!(effects.slow, 0);
        assert_eq!(effects.speed, 5_300);
    }

    #[test]
    fn test_boost_and_invincibility_stack() {
        let mut effects = ActiveEffects::new();
        effects.activate(EffectKind::Invincibility, 0);
        effects.activate(EffectKind::ScoreBoost, 0);
        effects.activate(EffectKind::Speed, 0);
        assert_eq!(
            effects.active_kinds(10),
            vec![
                EffectKind::Speed,
                EffectKind::ScoreBoost,
                EffectKind::Invincibility
            ]
        );
    }

    #[test]
    fn test_custom_duration() {
        let mut effects = ActiveEffects::new();
        effects.activate_for(EffectKind::Invincibility, 0, 300);
        assert!(effects.is_active(EffectKind::Invincibility, 299));
        assert!(!effects.is_active(EffectKind::Invincibility, 300));
    }
}
