pub mod auth;
pub mod dates;
pub mod paging;
pub mod schedule;
pub mod user;
