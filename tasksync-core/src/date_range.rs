//! Candidate fetch window for a sync run.

use chrono::{DateTime, Duration, Utc};

use crate::task::Task;

/// How far back to look for events of recently completed or overdue tasks.
const LOOKBACK_DAYS: i64 = 30;
/// Padding applied to both bounds against boundary drift.
const PAD_DAYS: i64 = 1;

/// The window of events fetched from the remote and scanned for identity
/// matches. Deliberately non-exhaustive: an event outside it is invisible,
/// so its task is treated as new (see `reconcile`).
#[derive(Debug, Clone, PartialEq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    /// Window covering this run's tasks: 30 days back through the furthest
    /// deadline being synced, padded a day on each side. Without any
    /// deadlines the horizon falls back to `now`.
    pub fn for_tasks(now: DateTime<Utc>, tasks: &[Task]) -> DateRange {
        let horizon = tasks
            .iter()
            .filter_map(|t| t.deadline)
            .max()
            .unwrap_or(now);

        DateRange {
            from: now - Duration::days(LOOKBACK_DAYS + PAD_DAYS),
            to: horizon + Duration::days(PAD_DAYS),
        }
    }

    pub fn from_rfc3339(&self) -> String {
        self.from.to_rfc3339()
    }

    pub fn to_rfc3339(&self) -> String {
        self.to.to_rfc3339()
    }
}
