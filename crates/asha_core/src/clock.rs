//! Wall-clock seam for time-dependent behavior.
//!
//! # Responsibility
//! - Provide the single source of current time for the whole crate.
//!
//! # Invariants
//! - Time/date intents, greeting selection and note-id stamping all read
//!   through this trait so tests can pin the clock.

use chrono::{DateTime, Local};

/// Current-time provider.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Fixed clock for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, FixedClock};
    use chrono::{Local, TimeZone};

    #[test]
    fn fixed_clock_returns_pinned_instant() {
        let pinned = Local.with_ymd_and_hms(2026, 8, 7, 9, 14, 0).unwrap();
        let clock = FixedClock(pinned);
        assert_eq!(clock.now(), pinned);
        assert_eq!(clock.now(), pinned);
    }
}
