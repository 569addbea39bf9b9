//! Wall-clock abstraction for the lazily integrated battery.
//!
//! There is no background timer in the backend. Every rover operation asks
//! the [`Clock`] for the current instant and integrates the battery over the
//! delta since the previous operation. Production code uses
//! [`SystemClock`]; tests drive time explicitly with [`ManualClock`].

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, TimeDelta, Utc};

/// Source of the current instant.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// The current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Time is stored as milliseconds since the Unix epoch in an atomic so the
/// clock can be shared behind an `Arc` and advanced from a test while the
/// world holds another handle to it.
#[derive(Debug)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            millis: AtomicI64::new(start.timestamp_millis()),
        }
    }

    /// Move the clock forward by `seconds` (fractional seconds allowed;
    /// millisecond resolution).
    #[allow(clippy::cast_possible_truncation)]
    pub fn advance_secs(&self, seconds: f64) {
        let delta = (seconds * 1000.0).round() as i64;
        self.millis.fetch_add(delta, Ordering::SeqCst);
    }

    /// Jump the clock to `instant`, which may be in the past.
    pub fn set(&self, instant: DateTime<Utc>) {
        self.millis
            .store(instant.timestamp_millis(), Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let millis = self.millis.load(Ordering::SeqCst);
        DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

/// Seconds elapsed from `earlier` to `later`. A negative delta, as after a
/// wall-clock adjustment, counts as zero.
pub fn elapsed_seconds(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    let delta: TimeDelta = later.signed_duration_since(earlier);
    delta.to_std().map_or(0.0, |d| d.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn manual_clock_advances_only_on_request() {
        let clock = ManualClock::default();
        let t0 = clock.now();
        assert_eq!(clock.now(), t0);
        clock.advance_secs(1.5);
        assert!(close(elapsed_seconds(t0, clock.now()), 1.5));
    }

    #[test]
    fn manual_clock_can_jump_backwards() {
        let clock = ManualClock::default();
        clock.advance_secs(10.0);
        let later = clock.now();
        clock.set(DateTime::<Utc>::UNIX_EPOCH);
        assert!(clock.now() < later);
    }

    #[test]
    fn negative_elapsed_is_zero() {
        let clock = ManualClock::default();
        let t0 = clock.now();
        clock.advance_secs(-5.0);
        assert!(close(elapsed_seconds(t0, clock.now()), 0.0));
    }

    #[test]
    fn system_clock_is_monotone_enough() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(elapsed_seconds(a, b) >= 0.0);
    }
}
