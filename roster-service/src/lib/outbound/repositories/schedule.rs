use async_trait::async_trait;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::dates::DateRange;
use crate::domain::schedule::errors::ScheduleError;
use crate::domain::schedule::models::Schedule;
use crate::domain::schedule::models::ScheduleId;
use crate::domain::schedule::models::ShiftLength;
use crate::domain::schedule::ports::ScheduleRepository;
use crate::domain::user::models::UserId;

/// Postgres-backed schedule store.
///
/// The `schedules_user_id_work_date_key` unique constraint is the
/// authoritative one-schedule-per-user-per-date guarantee; violations map
/// to the domain's duplicate error.
pub struct PostgresScheduleRepository {
    pool: PgPool,
}

impl PostgresScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ScheduleRow {
    id: Uuid,
    user_id: Uuid,
    work_date: NaiveDate,
    shift_length: i32,
    completed: bool,
    created_at: DateTime<Utc>,
}

impl ScheduleRow {
    fn into_domain(self) -> Result<Schedule, ScheduleError> {
        Ok(Schedule {
            id: ScheduleId(self.id),
            user_id: UserId(self.user_id),
            work_date: self.work_date,
            shift_length: ShiftLength::new(self.shift_length)?,
            completed: self.completed,
            created_at: self.created_at,
        })
    }
}

fn map_unique_violation(e: sqlx::Error, user_id: &UserId, work_date: NaiveDate) -> ScheduleError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation()
            && db_err.constraint() == Some("schedules_user_id_work_date_key")
        {
            return ScheduleError::Duplicate {
                owner: user_id.to_string(),
                work_date,
            };
        }
    }
    ScheduleError::DatabaseError(e.to_string())
}

#[async_trait]
impl ScheduleRepository for PostgresScheduleRepository {
    async fn create(&self, schedule: Schedule) -> Result<Schedule, ScheduleError> {
        sqlx::query(
            r#"
            INSERT INTO schedules (id, user_id, work_date, shift_length, completed, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(schedule.id.0)
        .bind(schedule.user_id.0)
        .bind(schedule.work_date)
        .bind(schedule.shift_length.hours())
        .bind(schedule.completed)
        .bind(schedule.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &schedule.user_id, schedule.work_date))?;

        Ok(schedule)
    }

    async fn find_by_id(&self, id: &ScheduleId) -> Result<Option<Schedule>, ScheduleError> {
        let row = sqlx::query_as::<_, ScheduleRow>(
            r#"
            SELECT id, user_id, work_date, shift_length, completed, created_at
            FROM schedules
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ScheduleError::DatabaseError(e.to_string()))?;

        row.map(ScheduleRow::into_domain).transpose()
    }

    async fn find_by_user_and_date(
        &self,
        user_id: &UserId,
        work_date: NaiveDate,
    ) -> Result<Option<Schedule>, ScheduleError> {
        let row = sqlx::query_as::<_, ScheduleRow>(
            r#"
            SELECT id, user_id, work_date, shift_length, completed, created_at
            FROM schedules
            WHERE user_id = $1 AND work_date = $2
            "#,
        )
        .bind(user_id.0)
        .bind(work_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ScheduleError::DatabaseError(e.to_string()))?;

        row.map(ScheduleRow::into_domain).transpose()
    }

    async fn update(&self, schedule: Schedule) -> Result<Schedule, ScheduleError> {
        let result = sqlx::query(
            r#"
            UPDATE schedules
            SET work_date = $2, shift_length = $3, completed = $4
            WHERE id = $1
            "#,
        )
        .bind(schedule.id.0)
        .bind(schedule.work_date)
        .bind(schedule.shift_length.hours())
        .bind(schedule.completed)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &schedule.user_id, schedule.work_date))?;

        if result.rows_affected() == 0 {
            return Err(ScheduleError::NotFound(schedule.id.to_string()));
        }

        Ok(schedule)
    }

    async fn delete(&self, id: &ScheduleId) -> Result<(), ScheduleError> {
        let result = sqlx::query(
            r#"
            DELETE FROM schedules
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| ScheduleError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ScheduleError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn find_completed_in_range(
        &self,
        user_id: &UserId,
        range: &DateRange,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Schedule>, ScheduleError> {
        let rows = sqlx::query_as::<_, ScheduleRow>(
            r#"
            SELECT id, user_id, work_date, shift_length, completed, created_at
            FROM schedules
            WHERE user_id = $1
              AND completed = TRUE
              AND work_date BETWEEN $2 AND $3
            ORDER BY work_date
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(user_id.0)
        .bind(range.start)
        .bind(range.end)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ScheduleError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(ScheduleRow::into_domain).collect()
    }

    async fn count_completed_in_range(
        &self,
        user_id: &UserId,
        range: &DateRange,
    ) -> Result<i64, ScheduleError> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM schedules
            WHERE user_id = $1
              AND completed = TRUE
              AND work_date BETWEEN $2 AND $3
            "#,
        )
        .bind(user_id.0)
        .bind(range.start)
        .bind(range.end)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ScheduleError::DatabaseError(e.to_string()))
    }
}
