use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::dates::DateRange;
use crate::domain::paging::Page;
use crate::domain::schedule::errors::ScheduleError;
use crate::domain::schedule::models::CreateScheduleCommand;
use crate::domain::schedule::models::Schedule;
use crate::domain::schedule::models::ScheduleId;
use crate::domain::schedule::models::ScheduleQuery;
use crate::domain::schedule::models::UpdateScheduleCommand;
use crate::domain::user::models::UserId;

/// Port for schedule operations.
#[async_trait]
pub trait ScheduleServicePort: Send + Sync + 'static {
    /// Create a schedule for the named user. `completed` defaults to true.
    ///
    /// # Errors
    /// * `UserNotFound` - no user with the given username
    /// * `Duplicate` - a schedule already exists for that user and date
    async fn create_schedule(
        &self,
        command: CreateScheduleCommand,
    ) -> Result<Schedule, ScheduleError>;

    /// Retrieve a schedule by identifier. Absence is an empty result, not an
    /// error.
    async fn get_schedule(&self, id: &ScheduleId) -> Result<Option<Schedule>, ScheduleError>;

    /// Apply a partial update.
    ///
    /// # Errors
    /// * `NotFound` - no such schedule
    /// * `Duplicate` - the new date collides with another schedule of the
    ///   same user
    async fn update_schedule(
        &self,
        id: &ScheduleId,
        command: UpdateScheduleCommand,
    ) -> Result<Schedule, ScheduleError>;

    /// Delete a schedule.
    ///
    /// # Errors
    /// * `NotFound` - no row was deleted
    async fn delete_schedule(&self, id: &ScheduleId) -> Result<(), ScheduleError>;

    /// One user's completed schedules inside the window, paginated.
    ///
    /// # Errors
    /// * `InvalidDateRange` - window spans more than twelve months
    async fn query_schedules(&self, query: ScheduleQuery) -> Result<Page<Schedule>, ScheduleError>;
}

/// Persistence operations for the schedule aggregate.
#[async_trait]
pub trait ScheduleRepository: Send + Sync + 'static {
    /// Persist a new schedule.
    ///
    /// The (user_id, work_date) unique constraint is the authoritative
    /// duplicate check; violations surface as `Duplicate`.
    async fn create(&self, schedule: Schedule) -> Result<Schedule, ScheduleError>;

    async fn find_by_id(&self, id: &ScheduleId) -> Result<Option<Schedule>, ScheduleError>;

    /// The schedule for one user on one date, if any.
    async fn find_by_user_and_date(
        &self,
        user_id: &UserId,
        work_date: NaiveDate,
    ) -> Result<Option<Schedule>, ScheduleError>;

    /// Update the full row.
    ///
    /// # Errors
    /// * `NotFound` - no row matched the id
    /// * `Duplicate` - unique violation on (user_id, work_date)
    async fn update(&self, schedule: Schedule) -> Result<Schedule, ScheduleError>;

    /// Remove a schedule.
    ///
    /// # Errors
    /// * `NotFound` - no row was deleted
    async fn delete(&self, id: &ScheduleId) -> Result<(), ScheduleError>;

    /// One page of a user's completed schedules with work dates inside the
    /// range, ordered by date.
    async fn find_completed_in_range(
        &self,
        user_id: &UserId,
        range: &DateRange,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Schedule>, ScheduleError>;

    /// Count matching `find_completed_in_range` without pagination.
    async fn count_completed_in_range(
        &self,
        user_id: &UserId,
        range: &DateRange,
    ) -> Result<i64, ScheduleError>;
}
