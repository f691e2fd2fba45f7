//! Time source for completion timestamps.

use chrono::Utc;

use super::CompletedAt;

/// Supplies the current time to the reconciliation rule.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> CompletedAt;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> CompletedAt {
        CompletedAt::from_millis(Utc::now().timestamp_millis())
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(CompletedAt);

impl FixedClock {
    /// Creates a clock frozen at `millis` since the epoch.
    #[must_use]
    pub const fn at_millis(millis: i64) -> Self {
        Self(CompletedAt::from_millis(millis))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> CompletedAt {
        self.0
    }
}
