//! Time sources used to bracket a measured run.
//!
//! A [`Timestamp`] is a signed count of nanoseconds from a clock-specific
//! epoch. Timestamps are only meaningful when subtracted from another
//! timestamp taken from the same clock.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use clap::ValueEnum;

use crate::error::{HarnessError, Result};

/// Nanoseconds in one second.
pub const NANOS_PER_SEC: i64 = 1_000_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    pub fn as_nanos(&self) -> i64 {
        self.0
    }
}

/// Nanoseconds between two timestamps, `end - start`.
///
/// A clock that steps backwards yields a negative value; it is returned as-is.
pub fn elapsed(start: Timestamp, end: Timestamp) -> i64 {
    end.0.saturating_sub(start.0)
}

pub trait Clock {
    fn now(&self) -> Result<Timestamp>;

    /// Short label used in reports.
    fn name(&self) -> &'static str;
}

/// Wall-clock time since the Unix epoch. Subject to system clock adjustments.
#[derive(Clone, Copy, Debug, Default)]
pub struct UtcClock;

impl Clock for UtcClock {
    fn now(&self) -> Result<Timestamp> {
        let since_epoch = SystemTime::now().duration_since(UNIX_EPOCH)?;
        let nanos = i64::try_from(since_epoch.as_nanos())
            .map_err(|_| HarnessError::Clock("system time overflows i64 nanoseconds".into()))?;
        Ok(Timestamp(nanos))
    }

    fn name(&self) -> &'static str {
        "utc"
    }
}

/// Monotonic time measured from the moment the clock was created.
#[derive(Clone, Copy, Debug)]
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
    fn now(&self) -> Result<Timestamp> {
        let nanos = i64::try_from(self.origin.elapsed().as_nanos())
            .map_err(|_| HarnessError::Clock("monotonic clock overflows i64 nanoseconds".into()))?;
        Ok(Timestamp(nanos))
    }

    fn name(&self) -> &'static str {
        "monotonic"
    }
}

/// Time source selectable from the command line.
#[derive(Clone, Copy, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum ClockKind {
    #[default]
    Monotonic,
    Utc,
}

impl ClockKind {
    pub fn build(self) -> Box<dyn Clock> {
        match self {
            ClockKind::Monotonic => Box::new(MonotonicClock::new()),
            ClockKind::Utc => Box::new(UtcClock),
        }
    }
}
