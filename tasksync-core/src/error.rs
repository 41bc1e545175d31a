//! Error types for the tasksync ecosystem.

use thiserror::Error;

/// Errors that can occur while syncing tasks to a calendar.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Calendar not found: {0}")]
    CalendarNotFound(String),

    #[error("Task source error: {0}")]
    Source(String),

    #[error("Task '{0}' has no deadline; a calendar event needs a time anchor")]
    MissingDeadline(String),

    #[error("Task '{task_id}' matches {count} calendar events, expected at most one")]
    AmbiguousMatch { task_id: String, count: usize },

    #[error("Event '{event_id}' has an unparseable start time '{value}'")]
    InvalidEventTime { event_id: String, value: String },

    #[error("Cannot update event for '{0}': no remote event id")]
    MissingEventId(String),

    #[error("Remote calendar error: {0}")]
    Remote(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for tasksync operations.
pub type SyncResult<T> = Result<T, SyncError>;
