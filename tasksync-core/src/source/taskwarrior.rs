//! Taskwarrior adapter: shells out to `task <filter…> export`.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use tokio::process::Command;

use crate::error::{SyncError, SyncResult};
use crate::task::{Source, Task, TaskStatus};

/// Taskwarrior's export timestamp form (UTC, no separators).
const EXPORT_TIME_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// One entry of `task export`. Only the fields tasksync consumes.
#[derive(Debug, Deserialize)]
struct ExportedTask {
    uuid: String,
    description: String,
    #[serde(default)]
    due: Option<String>,
    status: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    priority: Option<String>,
}

/// Run `task <filter…> export` and normalize the output.
pub async fn produce_tasks(filter: &[String]) -> SyncResult<Vec<Task>> {
    let binary = which::which("task")
        .map_err(|_| SyncError::Source("taskwarrior binary 'task' not found in PATH".into()))?;

    let output = Command::new(&binary)
        .args(filter)
        .arg("export")
        .output()
        .await
        .map_err(|e| SyncError::Source(format!("failed to run {}: {e}", binary.display())))?;

    if !output.status.success() {
        return Err(SyncError::Source(format!(
            "task export exited with status {}: {}",
            output.status.code().unwrap_or(-1),
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    parse_export(&String::from_utf8_lossy(&output.stdout))
}

/// Decode the JSON export into tasks.
fn parse_export(json: &str) -> SyncResult<Vec<Task>> {
    let exported: Vec<ExportedTask> = serde_json::from_str(json)
        .map_err(|e| SyncError::Source(format!("malformed task export: {e}")))?;

    exported.into_iter().map(to_task).collect()
}

fn to_task(raw: ExportedTask) -> SyncResult<Task> {
    let deadline = raw
        .due
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(parse_export_time)
        .transpose()?;

    Ok(Task {
        id: raw.uuid,
        description: raw.description,
        deadline,
        status: TaskStatus::normalize(&raw.status),
        source: Source::Taskwarrior,
        tags: raw.tags,
        priority: raw.priority,
    })
}

fn parse_export_time(s: &str) -> SyncResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, EXPORT_TIME_FORMAT)
        .map(|t| t.and_utc())
        .map_err(|e| SyncError::Source(format!("bad taskwarrior timestamp '{s}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_a_typical_export() {
        let json = r#"[
            {
                "uuid": "3f0c2a9e-7d41-4b8a-9f6e-2c1d0e5a8b37",
                "description": "Write report",
                "due": "20250601T100000Z",
                "status": "pending",
                "tags": ["work", "rem"],
                "priority": "H"
            },
            {
                "uuid": "9b1d4c2f-0a3e-4d5b-8c7f-6e5d4c3b2a19",
                "description": "Someday item",
                "status": "waiting"
            }
        ]"#;

        let tasks = parse_export(json).unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, "3f0c2a9e-7d41-4b8a-9f6e-2c1d0e5a8b37");
        assert_eq!(
            tasks[0].deadline,
            Some(Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap())
        );
        assert_eq!(tasks[0].status, TaskStatus::Pending);
        assert_eq!(tasks[0].source, Source::Taskwarrior);
        assert_eq!(tasks[0].tags, vec!["work", "rem"]);
        assert_eq!(tasks[0].priority.as_deref(), Some("H"));

        // waiting is not a synced status; it normalizes to pending
        assert_eq!(tasks[1].status, TaskStatus::Pending);
        assert_eq!(tasks[1].deadline, None);
    }

    #[test]
    fn empty_due_string_means_no_deadline() {
        let json = r#"[{"uuid": "aa-1", "description": "x", "due": "", "status": "pending"}]"#;

        let tasks = parse_export(json).unwrap();
        assert_eq!(tasks[0].deadline, None);
    }

    #[test]
    fn completed_and_deleted_statuses_survive() {
        let json = r#"[
            {"uuid": "aa-1", "description": "x", "status": "completed"},
            {"uuid": "bb-2", "description": "y", "status": "deleted"}
        ]"#;

        let tasks = parse_export(json).unwrap();
        assert_eq!(tasks[0].status, TaskStatus::Completed);
        assert_eq!(tasks[1].status, TaskStatus::Deleted);
    }

    #[test]
    fn malformed_export_fails_the_run() {
        assert!(matches!(
            parse_export("not json"),
            Err(SyncError::Source(_))
        ));
    }

    #[test]
    fn bad_timestamp_fails_the_run() {
        let json = r#"[{"uuid": "aa-1", "description": "x", "due": "tomorrow", "status": "pending"}]"#;

        assert!(matches!(parse_export(json), Err(SyncError::Source(_))));
    }
}
