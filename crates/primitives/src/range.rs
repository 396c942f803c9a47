//! Inclusive date ranges.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Date, SeriesError};

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    /// Create a new range.
    ///
    /// # Errors
    /// Returns [`SeriesError::InvalidRange`] if `start` is after `end`.
    pub fn new(start: Date, end: Date) -> Result<Self, SeriesError> {
        if start > end {
            return Err(SeriesError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// First date of the range.
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Last date of the range.
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Whether `date` falls inside the range.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
