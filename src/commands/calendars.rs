use anyhow::Result;
use owo_colors::OwoColorize;

use tasksync_provider_google::api::CalendarInfo;
use tasksync_provider_google::GoogleRemote;

use crate::render;

pub async fn run() -> Result<()> {
    let spinner = render::create_spinner("Fetching calendars".to_string());
    let calendars = fetch().await;
    spinner.finish_and_clear();

    for cal in calendars? {
        if cal.primary {
            println!("{} {}", cal.name, "(primary)".dimmed());
        } else {
            println!("{}", cal.name);
        }
    }

    Ok(())
}

async fn fetch() -> Result<Vec<CalendarInfo>> {
    let remote = GoogleRemote::connect().await?;
    Ok(remote.calendars().await?)
}
