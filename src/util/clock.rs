//! Wall-clock abstraction.
//!
//! The combat resolver's hit-invulnerability window is measured against the
//! validating server's real clock, not the simulated clock (see the combat
//! module). Keeping the clock behind a trait lets callers and tests pin it.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of wall-clock time in epoch milliseconds
pub trait WallClock {
    fn now_ms(&self) -> u64;
}

/// Real system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Clock pinned to a fixed instant, adjustable by tests
#[derive(Debug, Default)]
pub struct FixedClock {
    now_ms: std::cell::Cell<u64>,
}

impl FixedClock {
    pub fn new(now_ms: u64) -> Self {
        Self {
            now_ms: std::cell::Cell::new(now_ms),
        }
    }

    pub fn set(&self, now_ms: u64) {
        self.now_ms.set(now_ms);
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now_ms.set(self.now_ms.get() + delta_ms);
    }
}

impl WallClock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }
}
