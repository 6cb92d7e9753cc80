//! Time-based One-Time Passwords
//!
//! Secret handling, the RFC 6238 primitive and the engine that turns a
//! secret plus the current time into a token.

pub mod engine;
pub mod primitive;
pub mod secret;

use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// TOTP errors
#[derive(Debug, Error)]
pub enum TotpError {
    #[error("Invalid secret: {0}")]
    InvalidSecret(String),
}

pub type TotpResult<T> = Result<T, TotpError>;

/// Default time step (RFC 6238)
pub const DEFAULT_STEP: Duration = Duration::from_secs(30);

/// Default number of digits
pub const DEFAULT_DIGITS: usize = 6;

/// A generated one-time password and the end of its validity window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotpToken {
    /// The one-time password
    pub code: String,
    /// First instant at which `code` is no longer valid
    pub expires_at: DateTime<Utc>,
    /// Length of the validity window
    pub step: Duration,
}

impl TotpToken {
    /// Milliseconds left in the window at `now`, rounded up. Zero exactly
    /// when `now` has reached `expires_at`.
    pub fn remaining_ms(&self, now: DateTime<Utc>) -> u64 {
        if now >= self.expires_at {
            return 0;
        }

        let nanos = (self.expires_at - now).num_nanoseconds().unwrap_or(i64::MAX);
        u64::try_from(nanos.saturating_add(999_999) / 1_000_000).unwrap_or(u64::MAX)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn step_ms(&self) -> u64 {
        u64::try_from(self.step.as_millis()).unwrap_or(u64::MAX)
    }
}

// Re-exports
pub use engine::TotpEngine;
pub use primitive::{Rfc6238, TotpPrimitive};
pub use secret::Secret;
