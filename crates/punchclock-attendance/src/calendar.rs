//! Calendar arithmetic for monthly grids.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors for calendar computations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Month must be 1-12, got {month}")]
    InvalidMonth { month: u32 },

    #[error("Year {year} is out of calendar range")]
    InvalidYear { year: i32 },
}

/// Number of days in a calendar month, leap-year aware.
///
/// # Errors
/// Returns `CalendarError::InvalidMonth` for months outside 1-12 and
/// `CalendarError::InvalidYear` for years chrono cannot represent.
///
/// # Examples
///
/// ```
/// use punchclock_attendance::days_in_month;
///
/// assert_eq!(days_in_month(2024, 2).unwrap(), 29);
/// assert_eq!(days_in_month(2023, 2).unwrap(), 28);
/// ```
pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth { month });
    }

    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(CalendarError::InvalidYear { year })?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
            .ok_or(CalendarError::InvalidYear { year })?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
            .ok_or(CalendarError::InvalidYear { year })?
    };

    Ok(next_first.signed_duration_since(first).num_days() as u32)
}
