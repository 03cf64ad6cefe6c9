//! Wall-clock sources.

use std::fmt::Debug;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use chrono::Utc;
use tern_core::WriteTime;

/// Source of the current instant for default write times and reads.
pub trait Clock: Send + Sync + Debug {
    /// The current instant.
    fn now(&self) -> WriteTime;
}

/// Reads the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> WriteTime {
        WriteTime::from_micros(Utc::now().timestamp_micros())
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    micros: AtomicI64,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    pub fn new(start: WriteTime) -> Self {
        Self {
            micros: AtomicI64::new(start.as_micros()),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let micros = i64::try_from(by.as_micros()).unwrap_or(i64::MAX);
        self.micros.fetch_add(micros, Ordering::SeqCst);
    }

    /// Jump to an instant.
    pub fn set(&self, to: WriteTime) {
        self.micros.store(to.as_micros(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> WriteTime {
        WriteTime::from_micros(self.micros.load(Ordering::SeqCst))
    }
}
