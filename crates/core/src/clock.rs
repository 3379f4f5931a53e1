// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling
//!
//! Every timestamp this tool deals with (submission log entries, output file
//! mtimes, relative filters) is a local wall-clock time, so the clock hands out
//! naive local datetimes.

use chrono::{Local, NaiveDateTime};
#[cfg(any(test, feature = "test-support"))]
use chrono::{Duration, NaiveDate};
#[cfg(any(test, feature = "test-support"))]
use parking_lot::Mutex;
#[cfg(any(test, feature = "test-support"))]
use std::sync::Arc;

/// A clock that provides the current local time
pub trait Clock: Clone + Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Real system clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Fake clock for testing with controllable time
#[cfg(any(test, feature = "test-support"))]
#[derive(Clone, Debug)]
pub struct FakeClock {
    current: Arc<Mutex<NaiveDateTime>>,
}

#[cfg(any(test, feature = "test-support"))]
impl FakeClock {
    /// A clock fixed at 2024-01-15 12:00:00
    pub fn new() -> Self {
        let start = NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap_or_default();
        Self::at(start)
    }

    pub fn at(time: NaiveDateTime) -> Self {
        Self { current: Arc::new(Mutex::new(time)) }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock();
        *current += duration;
    }

    /// Set the clock to a specific time
    pub fn set(&self, time: NaiveDateTime) {
        *self.current.lock() = time;
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Clock for FakeClock {
    fn now(&self) -> NaiveDateTime {
        *self.current.lock()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
