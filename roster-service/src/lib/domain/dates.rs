use chrono::Datelike;
use chrono::NaiveDate;
use thiserror::Error;

/// Error for work-date parsing and range validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("Date must be in format YYYY-MM-DD. Example: 2000-08-20")]
    InvalidFormat,

    #[error("The maximum period of time is one year.")]
    ExceedsOneYear,
}

/// Parse a calendar date in strict `YYYY-MM-DD` form.
///
/// The round-trip check rejects unpadded input like `2022-1-1`, which the
/// format parser alone would accept.
pub fn parse_work_date(value: &str) -> Result<NaiveDate, DateRangeError> {
    let date =
        NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| DateRangeError::InvalidFormat)?;

    if date.format("%Y-%m-%d").to_string() != value {
        return Err(DateRangeError::InvalidFormat);
    }

    Ok(date)
}

/// Inclusive date window limited to twelve whole months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Validate and build a range.
    ///
    /// # Errors
    /// * `ExceedsOneYear` - the window spans more than 12 whole months
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if whole_months_between(start, end) > 12 {
            return Err(DateRangeError::ExceedsOneYear);
        }

        Ok(Self { start, end })
    }
}

// Whole-month difference with partial months truncated. An inverted range
// yields a negative count and therefore always validates.
fn whole_months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    let mut months = (end.year() - start.year()) * 12 + (end.month() as i32 - start.month() as i32);
    if end.day() < start.day() {
        months -= 1;
    }
    months
}
