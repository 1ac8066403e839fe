//! Derived mileage readings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One odometer reading extracted from an inspection record.
///
/// A normalized history yields these in chronological order. The sequence
/// is expected to be non-decreasing by mileage; violations are exactly
/// what the integrity detector flags, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MileageReading {
    pub date: NaiveDate,
    pub miles: u32,
}

impl MileageReading {
    pub fn new(date: NaiveDate, miles: u32) -> Self {
        Self { date, miles }
    }
}
