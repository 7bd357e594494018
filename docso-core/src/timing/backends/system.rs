//! Wall clock backed by `Instant::now`

use std::time::Instant;

use crate::timing::Clock;

/// Monotonic system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn name(&self) -> &'static str {
        "system"
    }
}
