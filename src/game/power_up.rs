use serde::{Deserialize, Serialize};

use super::clock::Millis;
use super::config::POWER_UP_LIFESPAN_MS;
use super::effects::EffectKind;
use super::state::Position;

/// A collectible sitting on the board until eaten or expired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUp {
    pub position: Position,
    pub kind: EffectKind,
    pub created_at: Millis,
    pub lifespan: Millis,
}

impl PowerUp {
    pub fn new(position: Position, kind: EffectKind, created_at: Millis) -> Self {
        Self {
            position,
            kind,
            created_at,
            lifespan: POWER_UP_LIFESPAN_MS,
        }
    }

    pub fn age(&self, now: Millis) -> Millis {
        now.saturating_sub(self.created_at)
    }

    /// Expired once its age strictly exceeds the lifespan
    pub fn is_expired(&self, now: Millis) -> bool {
        self.age(now) > self.lifespan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_and_expiry() {
        let power_up = PowerUp::new(Position::new(1, 2), EffectKind::Slow, 1_000);
        assert_eq!(power_up.age(1_500), 500);
        assert!(!power_up.is_expired(11_000));
        assert!(power_up.is_expired(11_001));
    }

    #[test]
    fn test_age_before_creation_is_zero() {
        let power_up = PowerUp::new(Position::new(0, 0), EffectKind::Speed, 1_000);
        assert_eq!(power_up.age(10), 0);
    }
}
