//! Per-task reconciliation.
//!
//! For one task and the windowed event listing, decide whether its calendar
//! event must be created, updated, or left alone, then apply that decision
//! through the remote gateway. The reconciler holds no state across tasks;
//! the listing is fetched once per run and scanned per task.

use std::collections::HashSet;
use std::fmt;

use chrono::DateTime;

use crate::convert::{self, GlyphStatus, IdentityToken};
use crate::error::{SyncError, SyncResult};
use crate::event::CalendarEvent;
use crate::remote::RemoteCalendar;
use crate::task::{Task, TaskStatus};

/// Which field forced an update. Checks run status → description → due and
/// stop at the first mismatch; later drift surfaces on the next run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateReason {
    Status,
    Description,
    Due,
}

impl fmt::Display for UpdateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateReason::Status => write!(f, "status"),
            UpdateReason::Description => write!(f, "description"),
            UpdateReason::Due => write!(f, "due"),
        }
    }
}

/// What reconciliation decided for one task.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// No event carries this task's identity token.
    Create,
    /// The matched event drifted from the task.
    Update {
        current: CalendarEvent,
        reason: UpdateReason,
    },
    /// The matched event already reflects the task.
    UpToDate,
}

/// Outcome of one applied decision, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created,
    Updated(UpdateReason),
    Unchanged,
}

/// Decide what to do for `task` given the candidate events.
///
/// Matching is parse-then-compare on the embedded identity token, never raw
/// substring search (`abc-1` must not match an event for `abc-12`). More
/// than one match is an `AmbiguousMatch` error: duplicates mean a previous
/// run misbehaved, and silently picking one would entrench the damage.
pub fn decide(task: &Task, candidates: &[CalendarEvent]) -> SyncResult<Decision> {
    let mut matches = candidates.iter().filter(|event| {
        IdentityToken::parse(&event.description).is_some_and(|token| token.task_id() == task.id)
    });

    let matched = match matches.next() {
        None => return Ok(Decision::Create),
        Some(event) => event,
    };

    let extra = matches.count();
    if extra > 0 {
        return Err(SyncError::AmbiguousMatch {
            task_id: task.id.clone(),
            count: extra + 1,
        });
    }

    match needs_update(task, matched)? {
        Some(reason) => Ok(Decision::Update {
            current: matched.clone(),
            reason,
        }),
        None => Ok(Decision::UpToDate),
    }
}

/// Compare the fields shared between a task and its matched event.
fn needs_update(task: &Task, event: &CalendarEvent) -> SyncResult<Option<UpdateReason>> {
    let (glyph, clean_summary) = convert::split_summary(&event.summary);

    let status_matches = match task.status {
        TaskStatus::Pending => glyph == GlyphStatus::Pending,
        TaskStatus::Completed => glyph == GlyphStatus::Completed,
        TaskStatus::Deleted => glyph == GlyphStatus::Deleted,
    };
    if !status_matches {
        return Ok(Some(UpdateReason::Status));
    }

    if task.description != clean_summary {
        return Ok(Some(UpdateReason::Description));
    }

    let deadline = task
        .deadline
        .ok_or_else(|| SyncError::MissingDeadline(task.id.clone()))?;
    let event_start =
        DateTime::parse_from_rfc3339(&event.start).map_err(|_| SyncError::InvalidEventTime {
            event_id: event.id.clone(),
            value: event.start.clone(),
        })?;

    // Whole-second comparison: RFC3339 round trips through the remote can
    // lose sub-second precision.
    if event_start.timestamp() != deadline.timestamp() {
        return Ok(Some(UpdateReason::Due));
    }

    Ok(None)
}

/// Reconcile one task against the candidates and apply the decision.
///
/// `candidates` is the windowed listing fetched once per run; it is not
/// refreshed between tasks. Errors abort this task only.
pub async fn sync_task(
    remote: &dyn RemoteCalendar,
    calendar_id: &str,
    task: &Task,
    candidates: &[CalendarEvent],
) -> SyncResult<Outcome> {
    let desired = convert::task_to_event(task)?;

    match decide(task, candidates)? {
        Decision::Create => {
            remote.create_event(calendar_id, &desired).await?;
            Ok(Outcome::Created)
        }
        Decision::Update { current, reason } => {
            if current.id.is_empty() {
                return Err(SyncError::MissingEventId(task.id.clone()));
            }
            let mut updated = desired;
            updated.id = current.id;
            remote.update_event(calendar_id, &updated).await?;
            Ok(Outcome::Updated(reason))
        }
        Decision::UpToDate => Ok(Outcome::Unchanged),
    }
}

/// Cancel events in the window whose identity token matches no task in this
/// run. Only called when pruning is explicitly enabled; events without a
/// token are left untouched (they were never ours), and anything outside
/// the fetch window is invisible and therefore safe from pruning.
pub async fn prune_orphans(
    remote: &dyn RemoteCalendar,
    calendar_id: &str,
    tasks: &[Task],
    candidates: &[CalendarEvent],
) -> SyncResult<usize> {
    let known: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();

    let mut pruned = 0;
    for event in candidates {
        let Some(token) = IdentityToken::parse(&event.description) else {
            continue;
        };
        if known.contains(token.task_id()) || event.id.is_empty() {
            continue;
        }
        remote.delete_event(calendar_id, &event.id).await?;
        pruned += 1;
    }

    Ok(pruned)
}
