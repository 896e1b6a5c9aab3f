//! Monotonic millisecond clocks
//!
//! The engine never reads time itself; callers pass `now` into every
//! state-mutating call. These clocks are where that value comes from.

use std::cell::Cell;
use std::time::Instant;

/// Milliseconds since some fixed origin, never decreasing
pub type Millis = u64;

pub trait Clock {
    fn now(&self) -> Millis;
}

/// Wall clock measured from its creation
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, millis: Millis) {
        self.now.set(self.now.get().saturating_add(millis));
    }

    /// Jump forward to `millis`; earlier values are ignored
    pub fn set(&self, millis: Millis) {
        if millis > self.now.get() {
            self.now.set(millis);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now.get()
    }
}
