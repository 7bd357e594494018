//! Manually advanced clock for testing
//!
//! Lets idle-eviction tests jump past a timeout without sleeping.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::timing::Clock;

/// Clock that only moves when [`advance`](ManualClock::advance) is called
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    /// Create a clock frozen at the current instant
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }

    fn name(&self) -> &'static str {
        "manual"
    }
}
