use std::time::{Duration, Instant};

/// Minimum spacing between accepted commands.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    interval: Duration,
    last: Option<Instant>,
}

impl RateLimiter {
    /// Negative or non-finite intervals disable throttling.
    pub fn new(interval_secs: f64) -> Self {
        let interval = Duration::try_from_secs_f64(interval_secs).unwrap_or(Duration::ZERO);
        Self {
            interval,
            last: None,
        }
    }

    /// Whether a command may be emitted at `now`.
    pub fn ready(&self, now: Instant) -> bool {
        match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    /// Accept and record `now` if ready.
    pub fn try_accept(&mut self, now: Instant) -> bool {
        if !self.ready(now) {
            return false;
        }
        self.last = Some(now);
        true
    }
}
