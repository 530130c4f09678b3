// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Temporary ids for records created while disconnected.
//!
//! A temporary id is the wall-clock time in milliseconds. Two records
//! created within the same millisecond (or after the clock stepped back)
//! still get distinct ids: the clock never hands out a value twice.

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::movie::MovieId;

/// Trait for getting the current wall clock time.
///
/// This allows injecting a mock clock for testing.
pub trait ClockSource: Send + Sync {
    /// Returns the current time in milliseconds since Unix epoch.
    fn now_ms(&self) -> i64;
}

/// System clock implementation using `std::time::SystemTime`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

impl<C: ClockSource> ClockSource for &C {
    fn now_ms(&self) -> i64 {
        (*self).now_ms()
    }
}

/// Anything that can hand out an id for a record created without one.
pub trait IdSource {
    fn next_id(&self) -> MovieId;
}

/// Generator of strictly increasing, timestamp-derived temporary ids.
pub struct TempIdClock<C: ClockSource = SystemClock> {
    clock: C,
    last: Mutex<MovieId>,
}

impl TempIdClock<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for TempIdClock<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ClockSource> TempIdClock<C> {
    pub fn with_clock(clock: C) -> Self {
        TempIdClock {
            clock,
            last: Mutex::new(0),
        }
    }

    /// Returns the next temporary id.
    pub fn next_id(&self) -> MovieId {
        let physical = self.clock.now_ms();
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        let id = if physical > *last { physical } else { *last + 1 };
        *last = id;
        id
    }

    /// Makes sure future ids are strictly greater than `seen`.
    ///
    /// Called with ids already present in the local cache so a restart
    /// cannot reissue one of them.
    pub fn observe(&self, seen: MovieId) {
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        if seen > *last {
            *last = seen;
        }
    }
}

impl<C: ClockSource> IdSource for TempIdClock<C> {
    fn next_id(&self) -> MovieId {
        TempIdClock::next_id(self)
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
