//! Source-agnostic task types.
//!
//! Adapters normalize their own vocabulary (taskwarrior's `waiting`, org's
//! `NEXT`, ...) into these types at the boundary; the reconciler only ever
//! sees this closed set.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// A unit of work from one of the task sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Stable identifier within the source (taskwarrior UUID, org `:ID:`).
    /// Reconciliation depends on this never changing for the same task.
    pub id: String,
    pub description: String,
    /// When the task is due. Tasks without a deadline are not synced.
    pub deadline: Option<DateTime<Utc>>,
    pub status: TaskStatus,
    /// Which adapter produced this task. Carried into the event description
    /// for traceability; never part of the identity key.
    pub source: Source,
    pub tags: Vec<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
    Deleted,
}

impl TaskStatus {
    /// Normalize a source-specific status keyword. Anything unrecognized
    /// (waiting, recurring, ...) is treated as pending.
    pub fn normalize(raw: &str) -> TaskStatus {
        match raw.to_ascii_lowercase().as_str() {
            "completed" => TaskStatus::Completed,
            "deleted" => TaskStatus::Deleted,
            _ => TaskStatus::Pending,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Deleted => write!(f, "deleted"),
        }
    }
}

/// The task source a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Taskwarrior,
    Orgmode,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Taskwarrior => write!(f, "taskwarrior"),
            Source::Orgmode => write!(f, "orgmode"),
        }
    }
}

impl FromStr for Source {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "taskwarrior" => Ok(Source::Taskwarrior),
            "orgmode" => Ok(Source::Orgmode),
            other => Err(SyncError::Config(format!(
                "unknown task source '{other}' (expected 'taskwarrior' or 'orgmode')"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_maps_known_statuses() {
        assert_eq!(TaskStatus::normalize("pending"), TaskStatus::Pending);
        assert_eq!(TaskStatus::normalize("completed"), TaskStatus::Completed);
        assert_eq!(TaskStatus::normalize("deleted"), TaskStatus::Deleted);
        assert_eq!(TaskStatus::normalize("Completed"), TaskStatus::Completed);
    }

    #[test]
    fn normalize_treats_unrecognized_as_pending() {
        assert_eq!(TaskStatus::normalize("waiting"), TaskStatus::Pending);
        assert_eq!(TaskStatus::normalize("recurring"), TaskStatus::Pending);
        assert_eq!(TaskStatus::normalize(""), TaskStatus::Pending);
    }

    #[test]
    fn source_round_trips_through_strings() {
        assert_eq!("taskwarrior".parse::<Source>().unwrap(), Source::Taskwarrior);
        assert_eq!("Orgmode".parse::<Source>().unwrap(), Source::Orgmode);
        assert_eq!(Source::Taskwarrior.to_string(), "taskwarrior");
        assert!("jira".parse::<Source>().is_err());
    }
}
