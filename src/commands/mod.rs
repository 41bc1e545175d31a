pub mod auth;
pub mod calendars;
pub mod sync;
