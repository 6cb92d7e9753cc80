//! TOTP Engine
//!
//! Answers "what is the current code, and when must it be regenerated".

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::{Rfc6238, Secret, TotpPrimitive, TotpResult, TotpToken};

/// Thin wrapper around a [`TotpPrimitive`]. Pure: schedules nothing.
#[derive(Debug, Clone, Default)]
pub struct TotpEngine<P = Rfc6238> {
    primitive: P,
}

impl<P: TotpPrimitive> TotpEngine<P> {
    pub fn new(primitive: P) -> Self {
        Self { primitive }
    }

    /// Generate the token for the window containing `now`
    pub fn generate(&self, secret: &Secret, now: DateTime<Utc>) -> TotpResult<TotpToken> {
        match self.primitive.generate(secret, now) {
            Ok(token) => {
                debug!(secret = %secret.masked(), expires_at = %token.expires_at, "generated token");
                Ok(token)
            }
            Err(e) => {
                warn!(secret = %secret.masked(), error = %e, "token generation failed");
                Err(e)
            }
        }
    }
}
