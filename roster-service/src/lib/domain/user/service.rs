use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use chrono::Utc;

use crate::domain::dates::DateRange;
use crate::domain::paging::Page;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserWorkHours;
use crate::domain::user::models::WorkHoursQuery;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

/// Domain service for admin user management and the work-hours report.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        // Pre-check keeps the original's error message; the storage unique
        // constraint remains the authoritative duplicate signal.
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(UserError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        let password_hash = self
            .password_hasher
            .hash(command.password.as_str())
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;

        let user = User {
            id: UserId::new(),
            name: command.name,
            username: command.username,
            password_hash,
            role: command.role.unwrap_or(Role::Staff),
            refresh_token: None,
            created_at: Utc::now(),
        };

        self.repository.create(user).await
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_username) = command.username {
            // A different user already holding the name is a conflict;
            // renaming to one's own current name is not.
            if let Some(existing) = self.repository.find_by_username(&new_username).await? {
                if existing.id != *id {
                    return Err(UserError::UsernameAlreadyExists(new_username.to_string()));
                }
            }
            user.username = new_username;
        }

        if let Some(new_name) = command.name {
            user.name = new_name;
        }

        if let Some(new_role) = command.role {
            user.role = new_role;
        }

        if let Some(new_password) = command.password {
            user.password_hash = self
                .password_hasher
                .hash(new_password.as_str())
                .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;
        }

        self.repository.update(user).await
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await
    }

    async fn query_work_hours(
        &self,
        query: WorkHoursQuery,
    ) -> Result<Page<UserWorkHours>, UserError> {
        let range = DateRange::new(query.start_date, query.end_date)?;

        let results = self
            .repository
            .sum_work_hours(&range, query.page.limit, query.page.offset())
            .await?;
        let total_items = self.repository.count().await?;

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
    use crate::domain::user::models::Password;
    use crate::domain::user::models::Username;

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

    fn stored_user(username: &str, role: Role) -> User {
        User {
            id: UserId::new(),
            name: "Test User".to_string(),
            username: Username::new(username.to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            role,
            refresh_token: None,
            created_at: Utc::now(),
        }
    }

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn create_user_defaults_to_staff_and_hashes_password() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|user| {
                user.role == Role::Staff
                    && user.refresh_token.is_none()
                    && user.password_hash.starts_with("$argon2")
                    && user.password_hash != "Password1"
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let command = CreateUserCommand {
            username: Username::new("carol".to_string()).unwrap(),
            password: Password::new("Password1".to_string()).unwrap(),
            name: "Carol".to_string(),
            role: None,
        };

        let user = service.create_user(command).await.unwrap();
        assert_eq!(user.role, Role::Staff);
    }

    #[tokio::test]
    async fn create_user_honors_explicit_admin_role() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|user| user.role == Role::Admin)
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let command = CreateUserCommand {
            username: Username::new("dave".to_string()).unwrap(),
            password: Password::new("Password1".to_string()).unwrap(),
            name: "Dave".to_string(),
            role: Some(Role::Admin),
        };

        assert!(service.create_user(command).await.is_ok());
    }

    #[tokio::test]
    async fn create_user_rejects_taken_username() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(stored_user("carol", Role::Staff))));
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository));

        let command = CreateUserCommand {
            username: Username::new("carol".to_string()).unwrap(),
            password: Password::new("Password1".to_string()).unwrap(),
            name: "Carol".to_string(),
            role: None,
        };

        let result = service.create_user(command).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::UsernameAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn get_user_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let result = service.get_user(&UserId::new()).await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_user_merges_partial_fields() {
        let mut repository = MockTestUserRepository::new();

        let existing = stored_user("carol", Role::Staff);
        let id = existing.id;

        let found = existing.clone();
        repository
            .expect_find_by_id()
            .withf(move |candidate| *candidate == id)
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));
        repository
            .expect_update()
            .withf(|user| {
                user.name == "Caroline"
                    && user.username.as_str() == "carol"
                    && user.role == Role::Admin
                    && user.password_hash == "$argon2id$test_hash"
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            username: None,
            password: None,
            name: Some("Caroline".to_string()),
            role: Some(Role::Admin),
        };

        let updated = service.update_user(&id, command).await.unwrap();
        assert_eq!(updated.name, "Caroline");
        assert_eq!(updated.role, Role::Admin);
    }

    #[tokio::test]
    async fn update_user_rejects_username_taken_by_other() {
        let mut repository = MockTestUserRepository::new();

        let existing = stored_user("carol", Role::Staff);
        let id = existing.id;

        let found = existing.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));
        // A different user already holds the requested name.
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(stored_user("dave", Role::Staff))));
        repository.expect_update().times(0);

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            username: Some(Username::new("dave".to_string()).unwrap()),
            password: None,
            name: None,
            role: None,
        };

        let result = service.update_user(&id, command).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::UsernameAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn update_user_allows_keeping_own_username() {
        let mut repository = MockTestUserRepository::new();

        let existing = stored_user("carol", Role::Staff);
        let id = existing.id;

        let found = existing.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));
        let same = existing.clone();
        repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(same.clone())));
        repository.expect_update().times(1).returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            username: Some(Username::new("carol".to_string()).unwrap()),
            password: None,
            name: None,
            role: None,
        };

        assert!(service.update_user(&id, command).await.is_ok());
    }

    #[tokio::test]
    async fn update_user_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            username: None,
            password: None,
            name: Some("Nobody".to_string()),
            role: None,
        };

        let result = service.update_user(&UserId::new(), command).await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_user_propagates_not_found() {
        let mut repository = MockTestUserRepository::new();
        let id = UserId::new();
        repository
            .expect_delete()
            .times(1)
            .returning(move |_| Err(UserError::NotFound(id.to_string())));

        let service = UserService::new(Arc::new(repository));

        let result = service.delete_user(&id).await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn work_hours_query_rejects_ranges_over_a_year() {
        let repository = MockTestUserRepository::new();
        let service = UserService::new(Arc::new(repository));

        let query = WorkHoursQuery {
            start_date: date("2022-01-01"),
            end_date: date("2023-02-01"),
            page: PageRequest::new(None, None),
        };

        let result = service.query_work_hours(query).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::InvalidDateRange(DateRangeError::ExceedsOneYear)
        ));
    }

    #[tokio::test]
    async fn work_hours_query_returns_envelope() {
        let mut repository = MockTestUserRepository::new();

        let rows = vec![
            UserWorkHours {
                id: UserId::new(),
                username: "alice".to_string(),
                name: "Alice".to_string(),
                work_hours: 24,
            },
            UserWorkHours {
                id: UserId::new(),
                username: "bob".to_string(),
                name: "Bob".to_string(),
                work_hours: 8,
            },
        ];

        let returned = rows.clone();
        repository
            .expect_sum_work_hours()
            .withf(|_, limit, offset| *limit == 2 && *offset == 0)
            .times(1)
            .returning(move |_, _, _| Ok(returned.clone()));
        repository.expect_count().times(1).returning(|| Ok(3));

        let service = UserService::new(Arc::new(repository));

        let query = WorkHoursQuery {
            start_date: date("2022-01-01"),
            end_date: date("2022-03-01"),
            page: PageRequest::new(Some(1), Some(2)),
        };

        let page = service.query_work_hours(query).await.unwrap();
        assert_eq!(page.total_items, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.current_page, 1);
        // Repository ordering (descending hours) is preserved.
        assert_eq!(page.results[0].work_hours, 24);
        assert_eq!(page.results[1].work_hours, 8);
    }

    #[tokio::test]
    async fn work_hours_empty_page_reports_zero_pages() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_sum_work_hours()
            .times(1)
            .returning(|_, _, _| Ok(vec![]));
        repository.expect_count().times(1).returning(|| Ok(5));

        let service = UserService::new(Arc::new(repository));

        let query = WorkHoursQuery {
            start_date: date("2022-01-01"),
            end_date: date("2022-03-01"),
            page: PageRequest::new(Some(7), Some(2)),
        };

        let page = service.query_work_hours(query).await.unwrap();
        assert_eq!(page.total_items, 5);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.current_page, 7);
        assert!(page.results.is_empty());
    }
}
