use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::dates::DateRange;
use crate::domain::paging::Page;
use crate::domain::schedule::errors::ScheduleError;
use crate::domain::schedule::models::CreateScheduleCommand;
use crate::domain::schedule::models::Schedule;
use crate::domain::schedule::models::ScheduleId;
use crate::domain::schedule::models::ScheduleQuery;
use crate::domain::schedule::models::UpdateScheduleCommand;
use crate::domain::schedule::ports::ScheduleRepository;
use crate::domain::schedule::ports::ScheduleServicePort;
use crate::domain::user::ports::UserRepository;

/// Domain service for schedule management and the range query.
///
/// Needs the user store as well: schedule creation names its owner by
/// username.
pub struct ScheduleService<SR, UR>
where
    SR: ScheduleRepository,
    UR: UserRepository,
{
    repository: Arc<SR>,
    user_repository: Arc<UR>,
}

impl<SR, UR> ScheduleService<SR, UR>
where
    SR: ScheduleRepository,
    UR: UserRepository,
{
    pub fn new(repository: Arc<SR>, user_repository: Arc<UR>) -> Self {
        Self {
            repository,
            user_repository,
        }
    }
}

#[async_trait]
impl<SR, UR> ScheduleServicePort for ScheduleService<SR, UR>
where
    SR: ScheduleRepository,
    UR: UserRepository,
{
    async fn create_schedule(
        &self,
        command: CreateScheduleCommand,
    ) -> Result<Schedule, ScheduleError> {
        let user = self
            .user_repository
            .find_by_username(&command.username)
            .await
            .map_err(|e| ScheduleError::DatabaseError(e.to_string()))?
            .ok_or_else(|| ScheduleError::UserNotFound(command.username.to_string()))?;

        // Pre-check keeps the original's error message; the storage unique
        // constraint remains the authoritative duplicate signal.
        if self
            .repository
            .find_by_user_and_date(&user.id, command.work_date)
            .await?
            .is_some()
        {
            return Err(ScheduleError::Duplicate {
                owner: user.username.to_string(),
                work_date: command.work_date,
            });
        }

        let schedule = Schedule {
            id: ScheduleId::new(),
            user_id: user.id,
            work_date: command.work_date,
            shift_length: command.shift_length,
            completed: command.completed.unwrap_or(true),
            created_at: Utc::now(),
        };

        self.repository.create(schedule).await
    }

    async fn get_schedule(&self, id: &ScheduleId) -> Result<Option<Schedule>, ScheduleError> {
        self.repository.find_by_id(id).await
    }

    async fn update_schedule(
        &self,
        id: &ScheduleId,
        command: UpdateScheduleCommand,
    ) -> Result<Schedule, ScheduleError> {
        let mut schedule = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ScheduleError::NotFound(id.to_string()))?;

        if let Some(new_date) = command.work_date {
            schedule.work_date = new_date;
        }

        if let Some(new_length) = command.shift_length {
            schedule.shift_length = new_length;
        }

        if let Some(new_completed) = command.completed {
            schedule.completed = new_completed;
        }

        self.repository.update(schedule).await
    }

    async fn delete_schedule(&self, id: &ScheduleId) -> Result<(), ScheduleError> {
        self.repository.delete(id).await
    }

    async fn query_schedules(&self, query: ScheduleQuery) -> Result<Page<Schedule>, ScheduleError> {
        let range = DateRange::new(query.start_date, query.end_date)?;

        let results = self
            .repository
            .find_completed_in_range(
                &query.user_id,
                &range,
                query.page.limit,
                query.page.offset(),
            )
            .await?;
        let total_items = self
            .repository
            .count_completed_in_range(&query.user_id, &range)
            .await?;

        Ok(Page::new(results, total_items, query.page))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::dates::DateRangeError;
    use crate::domain::paging::PageRequest;
    use crate::domain::schedule::models::ShiftLength;
    use crate::domain::user::errors::UserError;
    use crate::domain::user::models::Role;
    use crate::domain::user::models::User;
    use crate::domain::user::models::UserId;
    use crate::domain::user::models::UserWorkHours;
    use crate::domain::user::models::Username;

    mock! {
        pub TestScheduleRepository {}

        #[async_trait]
        impl ScheduleRepository for TestScheduleRepository {
            async fn create(&self, schedule: Schedule) -> Result<Schedule, ScheduleError>;
            async fn find_by_id(&self, id: &ScheduleId) -> Result<Option<Schedule>, ScheduleError>;
            async fn find_by_user_and_date(&self, user_id: &UserId, work_date: NaiveDate) -> Result<Option<Schedule>, ScheduleError>;
            async fn update(&self, schedule: Schedule) -> Result<Schedule, ScheduleError>;
            async fn delete(&self, id: &ScheduleId) -> Result<(), ScheduleError>;
            async fn find_completed_in_range(&self, user_id: &UserId, range: &DateRange, limit: i64, offset: i64) -> Result<Vec<Schedule>, ScheduleError>;
            async fn count_completed_in_range(&self, user_id: &UserId, range: &DateRange) -> Result<i64, ScheduleError>;
        }
    }

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
            async fn find_by_refresh_token(&self, refresh_token: &str) -> Result<Option<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
            async fn set_refresh_token(&self, id: &UserId, refresh_token: Option<String>) -> Result<(), UserError>;
            async fn delete(&self, id: &UserId) -> Result<(), UserError>;
            async fn count(&self) -> Result<i64, UserError>;
            async fn sum_work_hours(&self, range: &DateRange, limit: i64, offset: i64) -> Result<Vec<UserWorkHours>, UserError>;
        }
    }

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn alice() -> User {
        User {
            id: UserId::new(),
            name: "Alice".to_string(),
            username: Username::new("alice".to_string()).unwrap(),
            password_hash: "$argon2id$hash".to_string(),
            role: Role::Staff,
            refresh_token: None,
            created_at: Utc::now(),
        }
    }

    fn stored_schedule(user_id: UserId, work_date: NaiveDate) -> Schedule {
        Schedule {
            id: ScheduleId::new(),
            user_id,
            work_date,
            shift_length: ShiftLength::new(8).unwrap(),
            completed: true,
            created_at: Utc::now(),
        }
    }

    fn create_command(completed: Option<bool>) -> CreateScheduleCommand {
        CreateScheduleCommand {
            username: Username::new("alice".to_string()).unwrap(),
            work_date: date("2022-01-01"),
            shift_length: ShiftLength::new(8).unwrap(),
            completed,
        }
    }

    #[tokio::test]
    async fn create_schedule_defaults_completed_to_true() {
        let mut schedules = MockTestScheduleRepository::new();
        let mut users = MockTestUserRepository::new();

        let user = alice();
        let user_id = user.id;
        users
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        schedules
            .expect_find_by_user_and_date()
            .times(1)
            .returning(|_, _| Ok(None));
        schedules
            .expect_create()
            .withf(move |schedule| {
                schedule.completed && schedule.user_id == user_id
            })
            .times(1)
            .returning(|schedule| Ok(schedule));

        let service = ScheduleService::new(Arc::new(schedules), Arc::new(users));

        let schedule = service.create_schedule(create_command(None)).await.unwrap();
        assert!(schedule.completed);
        assert_eq!(schedule.work_date, date("2022-01-01"));
    }

    #[tokio::test]
    async fn create_schedule_keeps_explicit_completed_false() {
        let mut schedules = MockTestScheduleRepository::new();
        let mut users = MockTestUserRepository::new();

        let user = alice();
        users
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        schedules
            .expect_find_by_user_and_date()
            .times(1)
            .returning(|_, _| Ok(None));
        schedules
            .expect_create()
            .withf(|schedule| !schedule.completed)
            .times(1)
            .returning(|schedule| Ok(schedule));

        let service = ScheduleService::new(Arc::new(schedules), Arc::new(users));

        let schedule = service
            .create_schedule(create_command(Some(false)))
            .await
            .unwrap();
        assert!(!schedule.completed);
    }

    #[tokio::test]
    async fn create_schedule_rejects_unknown_user() {
        let mut schedules = MockTestScheduleRepository::new();
        let mut users = MockTestUserRepository::new();

        users
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        schedules.expect_create().times(0);

        let service = ScheduleService::new(Arc::new(schedules), Arc::new(users));

        let result = service.create_schedule(create_command(None)).await;
        assert!(matches!(
            result.unwrap_err(),
            ScheduleError::UserNotFound(_)
        ));
    }

    #[tokio::test]
    async fn create_schedule_rejects_second_schedule_for_same_date() {
        let mut schedules = MockTestScheduleRepository::new();
        let mut users = MockTestUserRepository::new();

        let user = alice();
        let user_id = user.id;
        users
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        schedules
            .expect_find_by_user_and_date()
            .times(1)
            .returning(move |_, work_date| Ok(Some(stored_schedule(user_id, work_date))));
        schedules.expect_create().times(0);

        let service = ScheduleService::new(Arc::new(schedules), Arc::new(users));

        let result = service.create_schedule(create_command(None)).await;
        assert!(matches!(
            result.unwrap_err(),
            ScheduleError::Duplicate { .. }
        ));
    }

    #[tokio::test]
    async fn get_schedule_returns_none_for_unknown_id() {
        let mut schedules = MockTestScheduleRepository::new();
        let users = MockTestUserRepository::new();

        schedules
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = ScheduleService::new(Arc::new(schedules), Arc::new(users));

        // The single-read path reports absence as an empty result.
        let result = service.get_schedule(&ScheduleId::new()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn update_schedule_merges_partial_fields() {
        let mut schedules = MockTestScheduleRepository::new();
        let users = MockTestUserRepository::new();

        let existing = stored_schedule(UserId::new(), date("2022-01-01"));
        let id = existing.id;

        let found = existing.clone();
        schedules
            .expect_find_by_id()
            .withf(move |candidate| *candidate == id)
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));
        schedules
            .expect_update()
            .withf(|schedule| {
                schedule.shift_length.hours() == 12
                    && schedule.work_date == NaiveDate::parse_from_str("2022-01-01", "%Y-%m-%d").unwrap()
                    && schedule.completed
            })
            .times(1)
            .returning(|schedule| Ok(schedule));

        let service = ScheduleService::new(Arc::new(schedules), Arc::new(users));

        let command = UpdateScheduleCommand {
            work_date: None,
            shift_length: Some(ShiftLength::new(12).unwrap()),
            completed: None,
        };

        let updated = service.update_schedule(&id, command).await.unwrap();
        assert_eq!(updated.shift_length.hours(), 12);
    }

    #[tokio::test]
    async fn update_schedule_not_found() {
        let mut schedules = MockTestScheduleRepository::new();
        let users = MockTestUserRepository::new();

        schedules
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = ScheduleService::new(Arc::new(schedules), Arc::new(users));

        let command = UpdateScheduleCommand {
            work_date: None,
            shift_length: None,
            completed: Some(false),
        };

        let result = service.update_schedule(&ScheduleId::new(), command).await;
        assert!(matches!(result.unwrap_err(), ScheduleError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_schedule_propagates_not_found() {
        let mut schedules = MockTestScheduleRepository::new();
        let users = MockTestUserRepository::new();

        let id = ScheduleId::new();
        schedules
            .expect_delete()
            .times(1)
            .returning(move |_| Err(ScheduleError::NotFound(id.to_string())));

        let service = ScheduleService::new(Arc::new(schedules), Arc::new(users));

        let result = service.delete_schedule(&id).await;
        assert!(matches!(result.unwrap_err(), ScheduleError::NotFound(_)));
    }

    #[tokio::test]
    async fn query_rejects_ranges_over_a_year() {
        let schedules = MockTestScheduleRepository::new();
        let users = MockTestUserRepository::new();

        let service = ScheduleService::new(Arc::new(schedules), Arc::new(users));

        let query = ScheduleQuery {
            user_id: UserId::new(),
            start_date: date("2022-01-01"),
            end_date: date("2023-02-01"),
            page: PageRequest::new(None, None),
        };

        let result = service.query_schedules(query).await;
        assert!(matches!(
            result.unwrap_err(),
            ScheduleError::InvalidDateRange(DateRangeError::ExceedsOneYear)
        ));
    }

    #[tokio::test]
    async fn query_returns_envelope_with_page_echo() {
        let mut schedules = MockTestScheduleRepository::new();
        let users = MockTestUserRepository::new();

        let user_id = UserId::new();
        let rows = vec![
            stored_schedule(user_id, date("2022-01-03")),
            stored_schedule(user_id, date("2022-01-10")),
        ];

        let returned = rows.clone();
        schedules
            .expect_find_completed_in_range()
            .withf(move |candidate, range, limit, offset| {
                *candidate == user_id
                    && range.start == date("2022-01-01")
                    && range.end == date("2022-03-01")
                    && *limit == 2
                    && *offset == 2
            })
            .times(1)
            .returning(move |_, _, _, _| Ok(returned.clone()));
        schedules
            .expect_count_completed_in_range()
            .times(1)
            .returning(|_, _| Ok(5));

        let service = ScheduleService::new(Arc::new(schedules), Arc::new(users));

        let query = ScheduleQuery {
            user_id,
            start_date: date("2022-01-01"),
            end_date: date("2022-03-01"),
            page: PageRequest::new(Some(2), Some(2)),
        };

        let page = service.query_schedules(query).await.unwrap();
        assert_eq!(page.total_items, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.results.len(), 2);
    }
}
