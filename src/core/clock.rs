//! Injectable time source for measuring query duration.

#![allow(missing_docs)]

use std::sync::Arc;

use chrono::{DateTime, Local, TimeDelta};
use parking_lot::Mutex;

/// Source of the current wall-clock instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Reads the system wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Manually driven clock. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    at: Arc<Mutex<DateTime<Local>>>,
}

impl ManualClock {
    #[must_use]
    pub fn new(at: DateTime<Local>) -> Self {
        Self {
            at: Arc::new(Mutex::new(at)),
        }
    }

    pub fn set(&self, at: DateTime<Local>) {
        *self.at.lock() = at;
    }

    pub fn advance(&self, delta: TimeDelta) {
        let mut at = self.at.lock();
        *at += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        *self.at.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn manual_clock_clones_observe_advances() {
        let start = Local.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        let shared = clock.clone();
        clock.advance(TimeDelta::milliseconds(250));
        assert_eq!(shared.now() - start, TimeDelta::milliseconds(250));
        shared.set(start);
        assert_eq!(clock.now(), start);
    }

    #[test]
    fn system_clock_moves_forward() {
        let clock = SystemClock;
        let first = clock.now();
        assert!(clock.now() >= first);
    }
}
