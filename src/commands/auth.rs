use anyhow::Result;

pub async fn run() -> Result<()> {
    tasksync_provider_google::auth::reauthenticate().await
}
