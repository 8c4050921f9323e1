//! Time sources for the interval timer.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

/// A source of monotonic time, wall-clock time, and sleeping.
///
/// The timer only ever asks the clock, never `Instant::now()` directly, so
/// tests can replace it with a clock that advances on demand.
pub trait Clock {
    /// Monotonic now, used for elapsed/remaining accounting.
    fn now(&self) -> Instant;

    /// Local wall-clock now, used for completion record timestamps.
    fn wall(&self) -> DateTime<Local>;

    /// Block the current thread for `duration`.
    fn sleep(&self, duration: Duration);
}

/// The real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall(&self) -> DateTime<Local> {
        Local::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
