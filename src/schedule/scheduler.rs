//! Countdown Scheduler
//!
//! Owns the active session and its one tick timer. The host event loop
//! asks for [`CountdownScheduler::next_deadline`] and calls
//! [`CountdownScheduler::poll`] when it passes; everything runs on the
//! host's thread, one step at a time.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use super::{Clock, CountdownState, SystemClock};
use crate::totp::{Rfc6238, Secret, TotpEngine, TotpError, TotpPrimitive, TotpResult, TotpToken};

/// Identifies one armed timer. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct TimerHandle {
    id: TimerId,
    due: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
}

/// The single active `{secret, token, countdown}` record
#[derive(Debug)]
pub struct Session {
    pub secret: Secret,
    pub token: TotpToken,
    pub countdown: CountdownState,
}

/// Result of firing a timer
#[derive(Debug)]
pub enum TickOutcome {
    /// Countdown updated, same token
    Ticked,
    /// Window ended and a fresh token is active
    Regenerated,
    /// Regeneration failed; the scheduler is now idle
    Failed(TotpError),
    /// The timer was cancelled before it fired
    Stale,
}

pub struct CountdownScheduler<P = Rfc6238, C = SystemClock> {
    engine: TotpEngine<P>,
    clock: C,
    interval: Duration,
    timer: Option<TimerHandle>,
    next_timer_id: u64,
    session: Option<Session>,
}

impl<P: TotpPrimitive, C: Clock> CountdownScheduler<P, C> {
    pub fn new(engine: TotpEngine<P>, clock: C, interval: Duration) -> Self {
        Self {
            engine,
            clock,
            interval,
            timer: None,
            next_timer_id: 0,
            session: None,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.session.is_some() {
            Phase::Running
        } else {
            Phase::Idle
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn token(&self) -> Option<&TotpToken> {
        self.session.as_ref().map(|s| &s.token)
    }

    pub fn secret(&self) -> Option<&Secret> {
        self.session.as_ref().map(|s| &s.secret)
    }

    /// Idle reads as zero remaining
    pub fn countdown(&self) -> CountdownState {
        self.session.as_ref().map(|s| s.countdown).unwrap_or_default()
    }

    pub fn live_timer(&self) -> Option<TimerId> {
        self.timer.as_ref().map(|t| t.id)
    }

    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.timer.as_ref().map(|t| t.due)
    }

    /// Time the host may block before the next tick is due
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        let due = self.next_deadline()?;
        Some((due - self.clock.now()).to_std().unwrap_or(Duration::ZERO))
    }

    /// Begin a new cycle for `secret`.
    ///
    /// The token is generated before the current cycle is touched, so a
    /// rejected secret leaves the running countdown as it was.
    pub fn start(&mut self, secret: Secret) -> TotpResult<&TotpToken> {
        let now = self.clock.now();
        let token = self.engine.generate(&secret, now)?;

        info!(secret = %secret.masked(), expires_at = %token.expires_at, "countdown started");
        let countdown = CountdownState::at(&token, now);
        self.arm(now);

        let session = self.session.insert(Session { secret, token, countdown });
        Ok(&session.token)
    }

    /// Stop the countdown and drop the session
    pub fn reset(&mut self) {
        self.cancel_timer();
        if self.session.take().is_some() {
            info!("countdown reset");
        }
    }

    /// Fire the live timer if its deadline has passed
    pub fn poll(&mut self) -> Option<TickOutcome> {
        let timer = self.timer.as_ref()?;
        if self.clock.now() < timer.due {
            return None;
        }
        let id = timer.id;
        Some(self.fire(id))
    }

    /// Deliver a timer callback. Only the live handle has any effect.
    pub fn fire(&mut self, id: TimerId) -> TickOutcome {
        if self.live_timer() != Some(id) {
            debug!(?id, "ignoring stale tick");
            return TickOutcome::Stale;
        }

        let now = self.clock.now();
        let Some(session) = self.session.as_mut() else {
            self.cancel_timer();
            return TickOutcome::Stale;
        };

        tick(session, now);
        if session.token.is_expired(now) {
            return self.regenerate(now);
        }

        self.arm(now);
        TickOutcome::Ticked
    }

    fn regenerate(&mut self, now: DateTime<Utc>) -> TickOutcome {
        let Some(session) = self.session.as_mut() else {
            return TickOutcome::Stale;
        };

        match self.engine.generate(&session.secret, now) {
            Ok(token) => {
                debug!(expires_at = %token.expires_at, "window boundary, token regenerated");
                session.countdown = CountdownState::at(&token, now);
                session.token = token;
                self.arm(now);
                TickOutcome::Regenerated
            }
            Err(e) => {
                error!(error = %e, "regeneration failed, countdown stopped");
                self.cancel_timer();
                self.session = None;
                TickOutcome::Failed(e)
            }
        }
    }

    /// Replace any live timer with a fresh one due one interval from `now`
    fn arm(&mut self, now: DateTime<Utc>) {
        self.cancel_timer();
        let id = TimerId(self.next_timer_id);
        self.next_timer_id += 1;
        self.timer = Some(TimerHandle { id, due: now + self.interval });
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            debug!(id = ?timer.id, "timer cancelled");
        }
    }
}

/// Recompute remaining time from the absolute expiry. A clock that steps
/// backwards never makes the countdown climb within one token.
fn tick(session: &mut Session, now: DateTime<Utc>) {
    let next = CountdownState::at(&session.token, now);
    if next.remaining_ms <= session.countdown.remaining_ms {
        session.countdown = next;
    }
}
