//! TOTP Primitive
//!
//! RFC 6238 code derivation, delegated to `totp-rs`.

use std::time::Duration;

use chrono::{DateTime, Utc};
use totp_rs::{Algorithm, TOTP};

use super::{Secret, TotpError, TotpResult, TotpToken, DEFAULT_DIGITS, DEFAULT_STEP};

/// Derives the code valid at `now` and the end of its window
pub trait TotpPrimitive {
    fn generate(&self, secret: &Secret, now: DateTime<Utc>) -> TotpResult<TotpToken>;
}

/// RFC 6238 generator. Parameters embedded in an `otpauth://` URI take
/// precedence over the configured ones.
#[derive(Debug, Clone, Copy)]
pub struct Rfc6238 {
    pub algorithm: Algorithm,
    pub digits: usize,
    pub step: Duration,
}

impl Default for Rfc6238 {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::SHA1,
            digits: DEFAULT_DIGITS,
            step: DEFAULT_STEP,
        }
    }
}

impl Rfc6238 {
    pub fn new(algorithm: Algorithm, digits: usize, step: Duration) -> Self {
        Self { algorithm, digits, step }
    }

    fn build_totp(&self, secret: &Secret) -> TotpResult<TOTP> {
        if secret.is_uri() {
            return TOTP::from_url_unchecked(secret.expose())
                .map_err(|e| TotpError::InvalidSecret(format!("Invalid otpauth URI: {}", e)));
        }

        let bytes = totp_rs::Secret::Encoded(secret.expose().to_string())
            .to_bytes()
            .map_err(|e| TotpError::InvalidSecret(format!("Invalid base32 secret: {}", e)))?;

        Ok(TOTP::new_unchecked(
            self.algorithm,
            self.digits,
            1,
            self.step.as_secs(),
            bytes,
            None,
            String::new(),
        ))
    }
}

impl TotpPrimitive for Rfc6238 {
    fn generate(&self, secret: &Secret, now: DateTime<Utc>) -> TotpResult<TotpToken> {
        let totp = self.build_totp(secret)?;
        if totp.step == 0 {
            return Err(TotpError::InvalidSecret("Period must be at least one second".to_string()));
        }

        let time = u64::try_from(now.timestamp()).unwrap_or(0);
        let window_end = (time / totp.step + 1) * totp.step;
        let expires_at = i64::try_from(window_end)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .ok_or_else(|| TotpError::InvalidSecret("Time out of range".to_string()))?;

        Ok(TotpToken {
            code: totp.generate(time),
            expires_at,
            step: Duration::from_secs(totp.step),
        })
    }
}
