//! The sync command: fetch tasks, fetch candidate events once, reconcile
//! each task, report per-task outcomes and a summary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;

use tasksync_core::date_range::DateRange;
use tasksync_core::event::CalendarEvent;
use tasksync_core::reconcile::{self, Outcome};
use tasksync_core::remote::RemoteCalendar;
use tasksync_core::source::{orgmode, taskwarrior};
use tasksync_core::{Source, Task};
use tasksync_provider_google::GoogleRemote;

use crate::config::Config;
use crate::render;

pub struct SyncArgs {
    pub calendar: Option<String>,
    pub source: Option<String>,
    pub filter: Vec<String>,
    pub file: Option<PathBuf>,
    pub prune: bool,
}

pub async fn run(args: SyncArgs) -> Result<()> {
    let config = Config::load()?;

    let calendar_name = args
        .calendar
        .or_else(|| config.calendar.clone())
        .context("No calendar given. Pass --calendar or set `calendar` in the config file")?;

    let source: Source = args
        .source
        .or_else(|| config.source.clone())
        .as_deref()
        .unwrap_or("taskwarrior")
        .parse()?;

    let filter = if !args.filter.is_empty() {
        args.filter
    } else if !config.filter.is_empty() {
        config.filter.clone()
    } else {
        default_filter(source)
    };

    // Source failures are fatal: never reconcile from a partial task list.
    let tasks = match source {
        Source::Taskwarrior => taskwarrior::produce_tasks(&filter).await?,
        Source::Orgmode => {
            let path = args
                .file
                .or_else(|| config.org_file.clone())
                .context("No org file given. Pass --file or set `org_file` in the config file")?;
            orgmode::produce_tasks(&path, &filter)?
        }
    };

    if tasks.is_empty() {
        println!("Filter {filter:?} matched no {source} tasks");
        return Ok(());
    }
    println!("Filter {filter:?} matched {} {source} tasks", tasks.len());

    let spinner = render::create_spinner(format!("Fetching events from '{calendar_name}'"));
    let setup = fetch_candidates(&calendar_name, &tasks).await;
    spinner.finish_and_clear();
    let (remote, calendar_id, range, candidates) = setup?;

    println!(
        "Found {} events between {} and {}",
        candidates.len(),
        range.from.format("%Y-%m-%d"),
        range.to.format("%Y-%m-%d")
    );

    let mut created = 0usize;
    let mut updated = 0usize;
    let mut unchanged = 0usize;
    let mut failed = 0usize;

    for task in &tasks {
        match reconcile::sync_task(&remote, &calendar_id, task, &candidates).await {
            Ok(outcome) => {
                match outcome {
                    Outcome::Created => created += 1,
                    Outcome::Updated(_) => updated += 1,
                    Outcome::Unchanged => unchanged += 1,
                }
                println!("{}", render::outcome_line(task, outcome));
            }
            Err(e) => {
                failed += 1;
                println!("{}", render::error_line(task, &e));
            }
        }
    }

    if args.prune || config.prune_orphans {
        let pruned = reconcile::prune_orphans(&remote, &calendar_id, &tasks, &candidates).await?;
        if pruned > 0 {
            println!("Pruned {pruned} orphaned events");
        }
    }

    println!(
        "\n{} tasks: {created} created, {updated} updated, {unchanged} unchanged, {failed} failed",
        tasks.len()
    );

    Ok(())
}

fn default_filter(source: Source) -> Vec<String> {
    match source {
        Source::Taskwarrior => vec!["+PENDING".to_string()],
        Source::Orgmode => vec![],
    }
}

async fn fetch_candidates(
    calendar_name: &str,
    tasks: &[Task],
) -> Result<(GoogleRemote, String, DateRange, Vec<CalendarEvent>)> {
    let remote = GoogleRemote::connect().await?;
    let calendar_id = remote.resolve_calendar_id(calendar_name).await?;
    let range = DateRange::for_tasks(Utc::now(), tasks);
    let candidates = remote.list_events(&calendar_id, &range).await?;
    Ok((remote, calendar_id, range, candidates))
}
