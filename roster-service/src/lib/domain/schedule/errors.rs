use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::dates::DateRangeError;

/// Error for ScheduleId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleIdError {
    #[error("Invalid schedule id format: {0}")]
    InvalidFormat(String),
}

/// Error for shift length validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShiftLengthError {
    #[error("Shift length must be a positive number of hours, got {0}")]
    NotPositive(i32),
}

/// Top-level error for all schedule operations
#[derive(Debug, Clone, Error)]
pub enum ScheduleError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid schedule id: {0}")]
    InvalidScheduleId(#[from] ScheduleIdError),

    #[error("Invalid shift length: {0}")]
    InvalidShiftLength(#[from] ShiftLengthError),

    #[error(transparent)]
    InvalidDateRange(#[from] DateRangeError),

    // Domain-level errors
    #[error("No schedule found with this id = {0}")]
    NotFound(String),

    /// Schedule creation names its owner by username; an unknown owner is a
    /// caller error, not a missing resource.
    #[error("The user with username = {0} is not found")]
    UserNotFound(String),

    /// At most one schedule per user and work date. `owner` is the username
    /// when raised by the service pre-check and the user id when raised by
    /// the storage constraint.
    #[error("A schedule has already been added for {owner} on {work_date}")]
    Duplicate { owner: String, work_date: NaiveDate },

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
