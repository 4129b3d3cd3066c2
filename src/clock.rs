//! Calendar source for rule evaluation and adjustment stamping
//!
//! Architecture: Port - the current date is an injected dependency
//! - SystemClock reads the local calendar date
//! - FixedClock pins the date for tests and replays

use chrono::{Datelike, Local, NaiveDate};
use std::fmt::Debug;

/// Source of "today" for the interval rule and the adjustment service
pub trait Clock: Send + Sync + Debug {
    /// Current calendar date
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the local system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock that always reports the same date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Whole calendar months from `start` to `end`, truncated toward zero.
///
/// A trailing partial month is dropped: 2024-01-31 to 2024-07-30 is 5 months.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let start_month = i64::from(start.year()) * 12 + i64::from(start.month0());
    let end_month = i64::from(end.year()) * 12 + i64::from(end.month0());

    let mut months = end_month - start_month;
    let day_delta = i64::from(end.day()) - i64::from(start.day());

    if months > 0 && day_delta < 0 {
        months -= 1;
    } else if months < 0 && day_delta > 0 {
        months += 1;
    }

    months
}
