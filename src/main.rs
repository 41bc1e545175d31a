mod commands;
mod config;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tasksync")]
#[command(about = "Mirror taskwarrior and org-mode tasks onto a Google calendar")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile tasks against their calendar events
    Sync {
        /// Calendar that receives the task events
        #[arg(short, long)]
        calendar: Option<String>,

        /// Task source: taskwarrior or orgmode
        #[arg(short, long)]
        source: Option<String>,

        /// Source-specific filter terms (taskwarrior filter args; org +tags or keywords)
        #[arg(short, long)]
        filter: Vec<String>,

        /// Org file to read tasks from (orgmode source only)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Cancel events whose task no longer exists (within the fetch window)
        #[arg(long)]
        prune: bool,
    },
    /// List the calendars visible to the authenticated account
    Calendars,
    /// Re-authenticate with Google Calendar
    Auth,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Sync {
            calendar,
            source,
            filter,
            file,
            prune,
        } => {
            commands::sync::run(commands::sync::SyncArgs {
                calendar,
                source,
                filter,
                file,
                prune,
            })
            .await
        }
        Commands::Calendars => commands::calendars::run().await,
        Commands::Auth => commands::auth::run().await,
    }
}
