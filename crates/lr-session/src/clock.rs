//! Calendar clock capability.

use chrono::{Local, NaiveDate};

/// Source of the current calendar date.
pub trait Clock: Send {
    /// Today's date in the user's calendar.
    fn today(&self) -> NaiveDate;
}

/// The system clock in local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock stuck on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
