use std::time::{Duration, Instant};

/// Fixed-interval tick source driven by the host loop.
///
/// The period is reconfigured whenever the game speed changes, so the new
/// interval applies from the next tick on.
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    period: Duration,
    last_tick: Instant,
}

impl TickClock {
    #[must_use]
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            last_tick: now,
        }
    }

    /// Returns true once a full period has elapsed since the last tick.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_tick) >= self.period
    }

    /// Time left until the next tick is due.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Duration {
        self.period
            .saturating_sub(now.saturating_duration_since(self.last_tick))
    }

    /// Records that a tick fired at `now`.
    pub fn mark(&mut self, now: Instant) {
        self.last_tick = now;
    }

    pub fn reconfigure(&mut self, period: Duration) {
        self.period = period;
    }

    /// Holds the clock while no ticks should be delivered; the next tick
    /// comes one full period after the clock is released.
    pub fn rearm(&mut self, now: Instant) {
        self.last_tick = now;
    }
}
