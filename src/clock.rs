// ⏰ Clock - wall-clock time as an explicit input
//
// "today", the 7/30-day windows and the current month all depend on now.
// Everything that needs now asks a Clock, so tests can pin it.

use chrono::{DateTime, FixedOffset, Local};
use std::cell::Cell;

pub trait Clock {
    /// Current instant in the user's local offset
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Reads the system clock in the machine's local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Clock frozen at a given instant; can be moved forward by hand
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<DateTime<FixedOffset>>,
}

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        FixedClock { now: Cell::new(now) }
    }

    /// Parse an RFC 3339 instant, e.g. "2024-06-18T09:00:00+07:00"
    pub fn at(rfc3339: &str) -> Result<Self, chrono::ParseError> {
        Ok(Self::new(DateTime::parse_from_rfc3339(rfc3339)?))
    }

    pub fn advance(&self, by: chrono::Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_fixed_clock_is_frozen() {
        let clock = FixedClock::at("2024-06-18T09:00:00+07:00").unwrap();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().to_rfc3339(), "2024-06-18T09:00:00+07:00");
    }

    #[test]
    fn test_fixed_clock_advance() {
        let clock = FixedClock::at("2024-06-18T09:00:00+07:00").unwrap();
        clock.advance(Duration::days(2));
        assert_eq!(clock.now().to_rfc3339(), "2024-06-20T09:00:00+07:00");
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
