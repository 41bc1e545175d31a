//! Colored terminal output for sync outcomes.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use tasksync_core::reconcile::Outcome;
use tasksync_core::{SyncError, Task};

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["-", "\\", "|", "/"])
            .template("{msg} {spinner}")
            .unwrap(),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// One line per task outcome.
pub fn outcome_line(task: &Task, outcome: Outcome) -> String {
    match outcome {
        Outcome::Created => format!("{} {}", "+".green(), task.description),
        Outcome::Updated(reason) => format!(
            "{} {} {}",
            "~".yellow(),
            task.description,
            format!("({reason})").dimmed()
        ),
        Outcome::Unchanged => format!("{} {}", "·".dimmed(), task.description.dimmed()),
    }
}

/// One line per failed task; the run continues past it.
pub fn error_line(task: &Task, error: &SyncError) -> String {
    format!(
        "{} {} {}",
        "✗".red(),
        task.description,
        error.to_string().red()
    )
}
