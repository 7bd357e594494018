//! Clock implementations
//!
//! - `SystemClock`: reads `std::time::Instant`
//! - `ManualClock`: only moves when told to; for tests

mod manual;
mod system;

pub use manual::ManualClock;
pub use system::SystemClock;
