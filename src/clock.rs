//! Clock
//!
//! Supplies the calendar date coupons are evaluated against.

use std::fmt;

use jiff::{Zoned, civil::Date};

/// Source of "today".
pub trait Clock: fmt::Debug + Send + Sync {
    /// The current calendar date.
    fn today(&self) -> Date;
}

/// Today in the system time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        Zoned::now().date()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Date);

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}
