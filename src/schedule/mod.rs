//! Countdown Scheduling
//!
//! Drives the passage of time for the active token: a single cancellable
//! tick timer, drift-free remaining-time computation and exactly-once
//! regeneration at each window boundary.

pub mod clock;
pub mod countdown;
pub mod scheduler;

use std::time::Duration;

/// Default tick cadence. Only affects animation smoothness.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

// Re-exports
pub use clock::{Clock, SystemClock};
pub use countdown::CountdownState;
pub use scheduler::{CountdownScheduler, Phase, TickOutcome};
