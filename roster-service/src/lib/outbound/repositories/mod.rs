pub mod schedule;
pub mod user;

pub use schedule::PostgresScheduleRepository;
pub use user::PostgresUserRepository;
