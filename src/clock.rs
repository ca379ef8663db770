//! Monotonic time sources.
//!
//! A [`ProgressBar`](crate::ProgressBar) reads the time once per update. The source is
//! abstracted behind [`Clock`] so tests and demos can drive time explicitly with a
//! [`ManualClock`] instead of sleeping.

use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use web_time::Instant;

/// A monotonic time source.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}

/// The default clock, backed by [`Instant::now`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same offset, so a test can keep one handle and give another to the
/// bar under test.
#[derive(Clone, Debug)]
pub struct ManualClock {
    base: Instant,
    offset: Arc<Mutex<Duration>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    /// Creates a clock frozen at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        *self.offset.lock() += by;
    }

    /// Returns how far the clock has been advanced since creation.
    #[must_use]
    pub fn offset(&self) -> Duration {
        *self.offset.lock()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.offset()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{Clock as _, ManualClock};

    /// Shared Offset
    /// Advancing one handle is visible through its clones.
    #[test]
    fn test_manual_clock_shared() {
        let clock = ManualClock::new();
        let view = clock.clone();
        let t0 = view.now();

        clock.advance(Duration::from_millis(1500));

        assert_eq!(view.now().duration_since(t0), Duration::from_millis(1500));
        assert_eq!(view.offset(), Duration::from_millis(1500));
    }
}
