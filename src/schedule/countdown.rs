//! Countdown State
//!
//! Remaining time derived from an absolute expiry, never decremented.

use chrono::{DateTime, Utc};

use crate::totp::TotpToken;

/// Snapshot of how far the active token is through its window
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CountdownState {
    /// Milliseconds until the code rotates
    pub remaining_ms: u64,
    /// Share of the window already elapsed, in `[0, 1]`
    pub fraction_elapsed: f64,
}

impl CountdownState {
    pub fn at(token: &TotpToken, now: DateTime<Utc>) -> Self {
        let step_ms = token.step_ms().max(1);
        let remaining_ms = token.remaining_ms(now).min(step_ms);
        let fraction_elapsed = 1.0 - remaining_ms as f64 / step_ms as f64;

        Self {
            remaining_ms,
            fraction_elapsed: fraction_elapsed.clamp(0.0, 1.0),
        }
    }

    /// Whole seconds left, floored
    pub fn remaining_secs(&self) -> u64 {
        self.remaining_ms / 1000
    }

    pub fn fraction_remaining(&self) -> f64 {
        1.0 - self.fraction_elapsed
    }

    pub fn label(&self) -> String {
        match self.remaining_secs() {
            1 => "1 second".to_string(),
            secs => format!("{} seconds", secs),
        }
    }
}
