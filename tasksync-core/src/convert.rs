//! Converting tasks into their calendar representation and back.
//!
//! Calendars have no custom-field API we can rely on, so the link between a
//! task and its event is an `ID: <task-id>` token embedded in the event's
//! free-text description. `IdentityToken` owns that format; changing it is a
//! compatibility migration for every event already on the calendar.

use std::fmt;
use std::sync::LazyLock;

use chrono::Duration;
use regex::Regex;

use crate::error::{SyncError, SyncResult};
use crate::event::{CalendarEvent, EventStatus};
use crate::task::{Task, TaskStatus};

/// Summary prefix marking a completed task.
pub const COMPLETED_GLYPH: &str = "✅";
/// Summary prefix marking a deleted task.
pub const DELETED_GLYPH: &str = "❌";

/// Events cover a fixed slot; the remote's own duration is never read back.
pub const EVENT_DURATION_MINUTES: i64 = 30;

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"ID: ([0-9A-Fa-f-]+)").unwrap());
static TOKEN_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Fa-f-]+$").unwrap());

/// The `ID: <token>` identity link embedded in event descriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityToken(String);

impl IdentityToken {
    pub fn new(task_id: &str) -> Self {
        IdentityToken(task_id.to_string())
    }

    pub fn task_id(&self) -> &str {
        &self.0
    }

    /// Whether an id fits the token shape (hex digits and hyphens). Ids that
    /// don't fit could be embedded but never extracted again, so adapters
    /// reject them up front.
    pub fn is_valid_id(id: &str) -> bool {
        TOKEN_ID_RE.is_match(id)
    }

    /// Extract the token from free text. Tolerates arbitrary text before and
    /// after it.
    pub fn parse(text: &str) -> Option<IdentityToken> {
        TOKEN_RE
            .captures(text)
            .map(|caps| IdentityToken(caps[1].to_string()))
    }
}

impl fmt::Display for IdentityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID: {}", self.0)
    }
}

/// Status read back from an event summary's leading glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphStatus {
    Pending,
    Completed,
    Deleted,
}

/// Strip a leading status glyph from an event summary. No glyph means the
/// calendar presumes the task pending.
pub fn split_summary(summary: &str) -> (GlyphStatus, &str) {
    if let Some(rest) = summary.strip_prefix(COMPLETED_GLYPH) {
        (GlyphStatus::Completed, rest.trim())
    } else if let Some(rest) = summary.strip_prefix(DELETED_GLYPH) {
        (GlyphStatus::Deleted, rest.trim())
    } else {
        (GlyphStatus::Pending, summary.trim())
    }
}

/// Build the calendar representation of a task.
///
/// Fails with `MissingDeadline` when the task has no deadline; an event
/// without a start time cannot exist.
pub fn task_to_event(task: &Task) -> SyncResult<CalendarEvent> {
    let deadline = task
        .deadline
        .ok_or_else(|| SyncError::MissingDeadline(task.id.clone()))?;

    let summary = match task.status {
        TaskStatus::Pending => task.description.clone(),
        TaskStatus::Completed => format!("{} {}", COMPLETED_GLYPH, task.description),
        TaskStatus::Deleted => format!("{} {}", DELETED_GLYPH, task.description),
    };

    let status = match task.status {
        TaskStatus::Deleted => EventStatus::Cancelled,
        _ => EventStatus::Confirmed,
    };

    let start = deadline.to_utc();
    let end = start + Duration::minutes(EVENT_DURATION_MINUTES);

    Ok(CalendarEvent {
        id: String::new(),
        summary,
        description: format!(
            "Source: {}, {}, Status: {}",
            task.source,
            IdentityToken::new(&task.id),
            task.status
        ),
        start: start.to_rfc3339(),
        end: end.to_rfc3339(),
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Source;
    use chrono::{TimeZone, Utc};

    fn make_task(status: TaskStatus) -> Task {
        Task {
            id: "abc-1".to_string(),
            description: "Write report".to_string(),
            deadline: Some(Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap()),
            status,
            source: Source::Taskwarrior,
            tags: vec![],
            priority: None,
        }
    }

    #[test]
    fn pending_task_encodes_plain_summary() {
        let event = task_to_event(&make_task(TaskStatus::Pending)).unwrap();

        assert_eq!(event.summary, "Write report");
        assert_eq!(event.status, EventStatus::Confirmed);
        assert_eq!(event.start, "2025-06-01T10:00:00+00:00");
        assert_eq!(event.end, "2025-06-01T10:30:00+00:00");
        assert!(event.id.is_empty());
    }

    #[test]
    fn completed_task_gets_glyph_but_stays_confirmed() {
        let event = task_to_event(&make_task(TaskStatus::Completed)).unwrap();

        assert_eq!(event.summary, "✅ Write report");
        assert_eq!(event.status, EventStatus::Confirmed);
    }

    #[test]
    fn deleted_task_gets_glyph_and_cancelled_status() {
        let event = task_to_event(&make_task(TaskStatus::Deleted)).unwrap();

        assert_eq!(event.summary, "❌ Write report");
        assert_eq!(event.status, EventStatus::Cancelled);
    }

    #[test]
    fn summary_round_trips_for_every_status() {
        for (status, glyph) in [
            (TaskStatus::Pending, GlyphStatus::Pending),
            (TaskStatus::Completed, GlyphStatus::Completed),
            (TaskStatus::Deleted, GlyphStatus::Deleted),
        ] {
            let event = task_to_event(&make_task(status)).unwrap();
            let (decoded, clean) = split_summary(&event.summary);
            assert_eq!(decoded, glyph);
            assert_eq!(clean, "Write report");
        }
    }

    #[test]
    fn missing_deadline_is_rejected() {
        let mut task = make_task(TaskStatus::Pending);
        task.deadline = None;

        match task_to_event(&task) {
            Err(SyncError::MissingDeadline(id)) => assert_eq!(id, "abc-1"),
            other => panic!("expected MissingDeadline, got {other:?}"),
        }
    }

    #[test]
    fn identity_token_extracts_from_encoded_description() {
        let event = task_to_event(&make_task(TaskStatus::Pending)).unwrap();
        let token = IdentityToken::parse(&event.description).unwrap();
        assert_eq!(token.task_id(), "abc-1");
    }

    #[test]
    fn identity_token_tolerates_surrounding_text() {
        let token =
            IdentityToken::parse("notes here\nSource: orgmode, ID: deadbeef-12, Status: pending")
                .unwrap();
        assert_eq!(token.task_id(), "deadbeef-12");

        assert!(IdentityToken::parse("no token in here").is_none());
        assert!(IdentityToken::parse("ID: zzz").is_none());
    }

    #[test]
    fn token_id_shape_is_enforced() {
        assert!(IdentityToken::is_valid_id("3f0c2a9e-7d41-4b8a-9f6e-2c1d0e5a8b37"));
        assert!(IdentityToken::is_valid_id("abc-1"));
        assert!(!IdentityToken::is_valid_id("write-report"));
        assert!(!IdentityToken::is_valid_id(""));
    }

    #[test]
    fn split_summary_trims_whitespace() {
        let (status, clean) = split_summary("✅  Pay rent ");
        assert_eq!(status, GlyphStatus::Completed);
        assert_eq!(clean, "Pay rent");

        let (status, clean) = split_summary("Pay rent");
        assert_eq!(status, GlyphStatus::Pending);
        assert_eq!(clean, "Pay rent");
    }
}
