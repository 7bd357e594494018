//! Time sources for idle tracking
//!
//! Pagination state records when it was last navigated and is evicted once
//! it has been idle for too long. The registry reads time through the
//! [`Clock`] trait so tests can drive it by hand.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │      PaginationRegistry      │
//! └──────────────┬───────────────┘
//!                │ now()
//!                ▼
//! ┌──────────────────────────────┐
//! │         Clock (trait)        │
//! ├───────────────┬──────────────┤
//! │ SystemClock   │ ManualClock  │
//! │ (Instant)     │ (testing)    │
//! └───────────────┴──────────────┘
//! ```

pub mod backends;

use std::sync::Arc;
use std::time::{Duration, Instant};

pub use backends::{ManualClock, SystemClock};

/// Monotonic time source
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> Instant;

    /// Backend name (for logging)
    fn name(&self) -> &'static str;

    /// Time elapsed since `earlier`, saturating at zero
    fn since(&self, earlier: Instant) -> Duration {
        self.now().saturating_duration_since(earlier)
    }
}

/// Clock shared between the registry and whoever drives it
pub type SharedClock = Arc<dyn Clock>;

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
