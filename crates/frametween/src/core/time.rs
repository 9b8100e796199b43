use std::cell::Cell;
use std::time::Instant;

/// Host clock. Seconds on a monotonic timeline; only differences matter.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Wall-clock time since construction, backed by `Instant`.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Clock driven by the host: time only moves when told to.
/// Used for fixed-step hosts, replays, and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, now: f64) {
        self.now.set(now);
    }

    /// Move time forward by `dt` seconds. Returns the new time.
    pub fn advance(&self, dt: f64) -> f64 {
        let now = self.now.get() + dt;
        self.now.set(now);
        now
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_moves_only_when_told() {
        let clock = ManualClock::new(2.0);
        assert_eq!(clock.now(), 2.0);
        assert_eq!(clock.advance(0.5), 2.5);
        assert_eq!(clock.now(), 2.5);
        clock.set(10.0);
        assert_eq!(clock.now(), 10.0);
    }

    #[test]
    fn monotonic_clock_never_goes_back() {
        let clock = MonotonicClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(a >= 0.0);
        assert!(b >= a, "a={} b={}", a, b);
    }
}
