use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::schedule::models::Schedule;

pub mod create_schedule;
pub mod delete_schedule;
pub mod get_schedule;
pub mod list_schedules;
pub mod update_schedule;

/// Schedule view returned by every schedule endpoint. Work dates serialize
/// as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleData {
    pub id: Uuid,
    pub user_id: Uuid,
    pub work_date: NaiveDate,
    pub shift_length: i32,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Schedule> for ScheduleData {
    fn from(schedule: &Schedule) -> Self {
        Self {
            id: schedule.id.0,
            user_id: schedule.user_id.0,
            work_date: schedule.work_date,
            shift_length: schedule.shift_length.hours(),
            completed: schedule.completed,
            created_at: schedule.created_at,
        }
    }
}
