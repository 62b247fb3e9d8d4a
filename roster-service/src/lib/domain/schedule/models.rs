use std::fmt;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::paging::PageRequest;
use crate::domain::schedule::errors::ScheduleIdError;
use crate::domain::schedule::errors::ShiftLengthError;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

/// Schedule aggregate entity: one shift assignment for one user on one
/// calendar date.
#[derive(Debug, Clone)]
pub struct Schedule {
    pub id: ScheduleId,
    pub user_id: UserId,
    pub work_date: NaiveDate,
    pub shift_length: ShiftLength,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Schedule unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleId(pub Uuid);

impl ScheduleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a schedule ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ScheduleIdError> {
        Uuid::parse_str(s)
            .map(ScheduleId)
            .map_err(|e| ScheduleIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ScheduleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Shift length in whole hours, strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftLength(i32);

impl ShiftLength {
    /// Validate a shift length.
    ///
    /// # Errors
    /// * `NotPositive` - zero or negative hours
    pub fn new(hours: i32) -> Result<Self, ShiftLengthError> {
        if hours <= 0 {
            return Err(ShiftLengthError::NotPositive(hours));
        }
        Ok(Self(hours))
    }

    pub fn hours(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for ShiftLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a schedule. The owner is named by username; resolution
/// to a user id happens in the service.
#[derive(Debug)]
pub struct CreateScheduleCommand {
    pub username: Username,
    pub work_date: NaiveDate,
    pub shift_length: ShiftLength,
    /// Defaults to true when unset.
    pub completed: Option<bool>,
}

/// Command for partial schedule updates. Only provided fields are changed.
#[derive(Debug)]
pub struct UpdateScheduleCommand {
    pub work_date: Option<NaiveDate>,
    pub shift_length: Option<ShiftLength>,
    pub completed: Option<bool>,
}

/// Query for one user's completed schedules inside a date window.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleQuery {
    pub user_id: UserId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub page: PageRequest,
}
