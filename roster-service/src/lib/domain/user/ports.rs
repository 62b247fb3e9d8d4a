use async_trait::async_trait;

use crate::domain::dates::DateRange;
use crate::domain::paging::Page;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserWorkHours;
use crate::domain::user::models::Username;
use crate::domain::user::models::WorkHoursQuery;

/// Port for the admin-facing user operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Create a user with an explicit role (defaults to staff when omitted).
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - username is taken
    /// * `DatabaseError` - storage failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Retrieve a user by identifier.
    ///
    /// # Errors
    /// * `NotFound` - no such user
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Apply a partial update.
    ///
    /// # Errors
    /// * `NotFound` - no such user
    /// * `UsernameAlreadyExists` - new username is taken by a different user
    async fn update_user(&self, id: &UserId, command: UpdateUserCommand)
        -> Result<User, UserError>;

    /// Delete a user; owned schedules cascade at the storage layer.
    ///
    /// # Errors
    /// * `NotFound` - no such user
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;

    /// Work-hours report: aggregated shift hours per user inside the window,
    /// sorted descending, paginated. Users without schedules appear with
    /// zero hours.
    ///
    /// # Errors
    /// * `InvalidDateRange` - window spans more than twelve months
    async fn query_work_hours(
        &self,
        query: WorkHoursQuery,
    ) -> Result<Page<UserWorkHours>, UserError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// The `username` unique constraint is the authoritative duplicate
    /// check; violations surface as `UsernameAlreadyExists`.
    async fn create(&self, user: User) -> Result<User, UserError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Look up the user currently holding this refresh token.
    async fn find_by_refresh_token(&self, refresh_token: &str) -> Result<Option<User>, UserError>;

    /// Update the full row.
    ///
    /// # Errors
    /// * `NotFound` - no row matched the id
    /// * `UsernameAlreadyExists` - unique violation on the new username
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Replace (or clear, with `None`) the stored refresh token.
    async fn set_refresh_token(
        &self,
        id: &UserId,
        refresh_token: Option<String>,
    ) -> Result<(), UserError>;

    /// Remove a user.
    ///
    /// # Errors
    /// * `NotFound` - no row was deleted
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;

    /// Total number of users, the report's `totalItems`.
    async fn count(&self) -> Result<i64, UserError>;

    /// One page of the work-hours aggregation (left join over schedules in
    /// the window, summed per user, descending).
    async fn sum_work_hours(
        &self,
        range: &DateRange,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UserWorkHours>, UserError>;
}
