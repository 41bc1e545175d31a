//! Org-mode adapter: reads tasks out of an outline file.
//!
//! Recognized per headline: a TODO keyword (mapped to a status), a trailing
//! `:tag:` list, a `DEADLINE:` planning line, and an `:ID:` property.
//! Entries without an `:ID:` that fits the identity-token shape are skipped;
//! without a stable id the event could never be matched again next run.
//!
//! Timestamps are interpreted as UTC; a date-only deadline lands at 00:00.

use std::path::Path;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use regex::Regex;

use crate::convert::IdentityToken;
use crate::error::{SyncError, SyncResult};
use crate::task::{Source, Task, TaskStatus};

static HEADLINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\*+)\s+(?:(TODO|NEXT|STARTED|WAITING|DONE|CANCELLED)\s+)?(.*?)(?:\s+(:[A-Za-z0-9_@#%:]+:))?\s*$").unwrap()
});
static DEADLINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"DEADLINE:\s*<(\d{4}-\d{2}-\d{2})(?:\s+[[:alpha:]]+)?(?:\s+(\d{1,2}:\d{2}))?[^>]*>")
        .unwrap()
});
static ID_PROPERTY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*:ID:\s*(\S+)\s*$").unwrap());

#[derive(Debug, Default)]
struct OrgEntry {
    keyword: Option<String>,
    title: String,
    tags: Vec<String>,
    deadline: Option<DateTime<Utc>>,
    id: Option<String>,
}

/// Read tasks from an org file, keeping entries that match every filter term.
pub fn produce_tasks(path: &Path, filter: &[String]) -> SyncResult<Vec<Task>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| SyncError::Source(format!("could not read {}: {e}", path.display())))?;

    Ok(parse_outline(&content)?
        .into_iter()
        .filter(|entry| matches_filter(entry, filter))
        .filter_map(entry_to_task)
        .collect())
}

fn parse_outline(content: &str) -> SyncResult<Vec<OrgEntry>> {
    let mut entries = Vec::new();
    let mut current: Option<OrgEntry> = None;

    for line in content.lines() {
        if let Some(caps) = HEADLINE_RE.captures(line) {
            if let Some(done) = current.take() {
                entries.push(done);
            }
            current = Some(OrgEntry {
                keyword: caps.get(2).map(|m| m.as_str().to_string()),
                title: caps[3].trim().to_string(),
                tags: caps
                    .get(4)
                    .map(|m| {
                        m.as_str()
                            .split(':')
                            .filter(|t| !t.is_empty())
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default(),
                ..OrgEntry::default()
            });
            continue;
        }

        let Some(entry) = current.as_mut() else {
            // Text before the first headline carries nothing we track.
            continue;
        };

        if let Some(caps) = DEADLINE_RE.captures(line) {
            entry.deadline = Some(parse_timestamp(&caps[1], caps.get(2).map(|m| m.as_str()))?);
        } else if let Some(caps) = ID_PROPERTY_RE.captures(line) {
            entry.id = Some(caps[1].to_string());
        }
    }

    if let Some(done) = current.take() {
        entries.push(done);
    }

    Ok(entries)
}

fn parse_timestamp(date: &str, time: Option<&str>) -> SyncResult<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| SyncError::Source(format!("bad org date '{date}': {e}")))?;

    let time = match time {
        Some(t) => NaiveTime::parse_from_str(t, "%H:%M")
            .map_err(|e| SyncError::Source(format!("bad org time '{t}': {e}")))?,
        None => NaiveTime::MIN,
    };

    Ok(date.and_time(time).and_utc())
}

/// `+tag` terms require a tag, bare terms require that TODO keyword.
/// All terms must match; an empty filter matches everything.
fn matches_filter(entry: &OrgEntry, filter: &[String]) -> bool {
    filter.iter().all(|term| match term.strip_prefix('+') {
        Some(tag) => entry.tags.iter().any(|t| t == tag),
        None => entry.keyword.as_deref() == Some(term.as_str()),
    })
}

fn entry_to_task(entry: OrgEntry) -> Option<Task> {
    let id = entry.id.filter(|id| IdentityToken::is_valid_id(id))?;

    let status = match entry.keyword.as_deref() {
        Some("DONE") => TaskStatus::Completed,
        Some("CANCELLED") => TaskStatus::Deleted,
        _ => TaskStatus::Pending,
    };

    Some(Task {
        id,
        description: entry.title,
        deadline: entry.deadline,
        status,
        source: Source::Orgmode,
        tags: entry.tags,
        priority: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const OUTLINE: &str = "\
#+TITLE: inbox

* TODO Write report :work:rem:
  DEADLINE: <2025-06-01 Sun 10:00>
  :PROPERTIES:
  :ID: 3f0c2a9e-7d41-4b8a-9f6e-2c1d0e5a8b37
  :END:
* DONE Pay rent
  DEADLINE: <2025-05-28 Wed>
  :PROPERTIES:
  :ID: ab12-34
  :END:
* CANCELLED Old idea
  :PROPERTIES:
  :ID: cd56-78
  :END:
* TODO No identity here
  DEADLINE: <2025-06-03 Tue 09:00>
* Plain note without keyword
";

    fn parse(filter: &[&str]) -> Vec<Task> {
        let entries = parse_outline(OUTLINE).unwrap();
        let filter: Vec<String> = filter.iter().map(|s| s.to_string()).collect();
        entries
            .into_iter()
            .filter(|e| matches_filter(e, &filter))
            .filter_map(entry_to_task)
            .collect()
    }

    #[test]
    fn parses_headlines_with_keyword_tags_deadline_and_id() {
        let tasks = parse(&[]);

        assert_eq!(tasks.len(), 3);
        let report = &tasks[0];
        assert_eq!(report.id, "3f0c2a9e-7d41-4b8a-9f6e-2c1d0e5a8b37");
        assert_eq!(report.description, "Write report");
        assert_eq!(report.tags, vec!["work", "rem"]);
        assert_eq!(report.status, TaskStatus::Pending);
        assert_eq!(
            report.deadline,
            Some(Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap())
        );
        assert_eq!(report.source, Source::Orgmode);
    }

    #[test]
    fn date_only_deadline_lands_at_midnight() {
        let tasks = parse(&[]);

        assert_eq!(
            tasks[1].deadline,
            Some(Utc.with_ymd_and_hms(2025, 5, 28, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn done_and_cancelled_keywords_map_to_statuses() {
        let tasks = parse(&[]);

        assert_eq!(tasks[1].status, TaskStatus::Completed);
        assert_eq!(tasks[2].status, TaskStatus::Deleted);
    }

    #[test]
    fn entries_without_usable_id_are_skipped() {
        let tasks = parse(&[]);

        assert!(tasks.iter().all(|t| t.description != "No identity here"));
        assert!(tasks.iter().all(|t| t.description != "Plain note without keyword"));
    }

    #[test]
    fn tag_filter_narrows_entries() {
        let tasks = parse(&["+rem"]);

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].description, "Write report");
    }

    #[test]
    fn keyword_filter_narrows_entries() {
        let tasks = parse(&["DONE"]);

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].description, "Pay rent");
    }

    #[test]
    fn missing_file_is_a_source_error() {
        let err = produce_tasks(Path::new("/nonexistent/inbox.org"), &[]).unwrap_err();
        assert!(matches!(err, SyncError::Source(_)));
    }
}
