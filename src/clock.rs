//! Clock and time-based ids

use std::cell::Cell;

use jiff::{Timestamp, civil::Date, tz::TimeZone};

/// Source of the current time.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> Timestamp;

    /// The current calendar date in UTC.
    fn today(&self) -> Date {
        self.now().to_zoned(TimeZone::UTC).date()
    }
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<Timestamp>,
}

impl FixedClock {
    /// Create a clock frozen at `now`.
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    /// Move the clock to `now`.
    pub fn set(&self, now: Timestamp) {
        self.now.set(now);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Millisecond-timestamp ids that never repeat within one sequence.
///
/// Two ids requested in the same millisecond, or after the clock stepped backwards,
/// continue from the last issued id instead of colliding with it.
#[derive(Debug, Clone, Default)]
pub struct MonotonicIds {
    last: u64,
}

impl MonotonicIds {
    /// Start a sequence that will only issue ids greater than `last`.
    pub fn after(last: u64) -> Self {
        Self { last }
    }

    /// Issue the next id for the instant `now`.
    pub fn next(&mut self, now: Timestamp) -> u64 {
        let millis = u64::try_from(now.as_millisecond()).unwrap_or(0);
        let id = millis.max(self.last.saturating_add(1));

        self.last = id;

        id
    }

    /// The most recently issued id, or the seed if none was issued yet.
    pub fn last(&self) -> u64 {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn ids_follow_the_clock() -> TestResult {
        let mut ids = MonotonicIds::default();

        let first = ids.next(Timestamp::from_millisecond(1_000)?);
        let second = ids.next(Timestamp::from_millisecond(2_000)?);

        assert_eq!(first, 1_000);
        assert_eq!(second, 2_000);

        Ok(())
    }

    #[test]
    fn same_millisecond_ids_are_distinct() -> TestResult {
        let now = Timestamp::from_millisecond(1_000)?;
        let mut ids = MonotonicIds::default();

        let first = ids.next(now);
        let second = ids.next(now);

        assert_eq!(first, 1_000);
        assert_eq!(second, 1_001);

        Ok(())
    }

    #[test]
    fn seeded_sequence_skips_past_seed() -> TestResult {
        let mut ids = MonotonicIds::after(5_000);

        assert_eq!(ids.next(Timestamp::from_millisecond(1_000)?), 5_001);
        assert_eq!(ids.last(), 5_001);

        Ok(())
    }

    #[test]
    fn fixed_clock_reports_utc_date() -> TestResult {
        let clock = FixedClock::new("2025-03-14T23:30:00Z".parse()?);

        assert_eq!(clock.today(), jiff::civil::date(2025, 3, 14));

        clock.set("2025-03-15T00:30:00Z".parse()?);

        assert_eq!(clock.today(), jiff::civil::date(2025, 3, 15));

        Ok(())
    }
}
