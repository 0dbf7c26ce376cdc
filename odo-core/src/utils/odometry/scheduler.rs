//! Fixed-rate gate for the publish cycle.
//!
//! The main loop polls [`RateScheduler::needs_run`] as fast as it likes; the
//! scheduler answers `true` once per period. There is no sleeping here, only
//! a predicate over the caller-supplied clock.

use embassy_time::{Duration, Instant};

/// Decides when the next publish cycle is due.
///
/// On each fire the reference point advances by exactly one period, not to
/// `now`, so a late poll shifts the cycle by at most one period's jitter
/// instead of accumulating drift. A long stall is paid back as a burst of
/// catch-up fires; over any span `D` the number of fires is `D / period`
/// regardless of how often the scheduler is polled.
pub struct RateScheduler {
    period: Duration,
    next_run: Instant,
}

impl RateScheduler {
    /// Schedule at `hz` cycles per second, starting one period after `now`.
    pub fn from_hz(
        hz: u64,
        now: Instant,
    ) -> Self {
        Self::new(Duration::from_hz(hz), now)
    }

    pub fn new(
        period: Duration,
        now: Instant,
    ) -> Self {
        RateScheduler {
            period,
            next_run: now + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns `true` when a cycle is due, advancing the deadline by one
    /// period. Returns `false` with no side effects otherwise.
    pub fn needs_run(
        &mut self,
        now: Instant,
    ) -> bool {
        if now >= self.next_run {
            self.next_run += self.period;
            true
        } else {
            false
        }
    }
}
