//! Time source for the engine, injectable so cache expiry is testable.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::post::types::{now_millis, Millis};

pub trait Clock: Send + Sync {
    /// Current time in epoch milliseconds.
    fn now(&self) -> Millis;
}

/// Wall-clock time via `chrono::Utc::now`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Millis {
        now_millis()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    // f64 bits, so the clock can be shared without a lock.
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: AtomicU64::new(start.to_bits()),
        }
    }

    pub fn set(&self, t: Millis) {
        self.now.store(t.to_bits(), Ordering::SeqCst);
    }

    pub fn advance(&self, by: Millis) {
        self.set(self.now() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        Millis::from_bits(self.now.load(Ordering::SeqCst))
    }
}
