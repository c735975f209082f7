use std::{fmt::Debug, ops::RangeInclusive};

use serde::{Deserialize, Serialize};

use crate::{DateError, prelude::*};

/// A closed interval between two instants (inclusive on both ends).
///
/// Construction does not validate ordering: intervals come straight from
/// caller configuration, and an inverted interval is only reported when a
/// containment check runs against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateInterval<I> {
    pub start: I,
    pub end:   I,
}

impl<I> DateInterval<I> {
    pub const fn new(start: I, end: I) -> Self {
        Self { start, end }
    }
}

impl<I: Copy + PartialOrd + Debug> DateInterval<I> {
    /// Checks if the interval contains a given instant.
    ///
    /// # Errors
    /// Returns `DateError::InvalidInterval` if start is after end.
    pub fn contains(&self, instant: I) -> Result<bool, DateError> {
        if self.start > self.end {
            return Err(DateError::InvalidInterval {
                start: format!("{:?}", self.start),
                end:   format!("{:?}", self.end),
            });
        }
        Ok(self.start <= instant && instant <= self.end)
    }
}

impl<I> From<(I, I)> for DateInterval<I> {
    fn from((start, end): (I, I)) -> Self {
        Self { start, end }
    }
}

/// A contiguous block of years shown on one page of the year grid.
///
/// Periods are aligned to multiples of the block length: with 12 years per
/// page the blocks are 1-12, 13-24, ..., 2017-2028, 2029-2040.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{start_period}-{end_period}")]
pub struct YearsPeriod {
    pub start_period: i32,
    pub end_period:   i32,
}

impl YearsPeriod {
    /// Computes the period of `year_item_number` years that contains `year`.
    pub fn containing(year: i32, year_item_number: i32) -> Self {
        // ceil(year / n) for any sign of year
        let end_period = -((-year).div_euclid(year_item_number)) * year_item_number;
        Self {
            start_period: end_period - (year_item_number - 1),
            end_period,
        }
    }

    /// Iterates the years of the period in ascending order
    pub const fn years(&self) -> RangeInclusive<i32> {
        self.start_period..=self.end_period
    }

    /// The period immediately before this one
    pub const fn previous(&self) -> Self {
        let len = self.end_period - self.start_period + 1;
        Self {
            start_period: self.start_period - len,
            end_period:   self.end_period - len,
        }
    }

    /// The period immediately after this one
    pub const fn next(&self) -> Self {
        let len = self.end_period - self.start_period + 1;
        Self {
            start_period: self.start_period + len,
            end_period:   self.end_period + len,
        }
    }
}
