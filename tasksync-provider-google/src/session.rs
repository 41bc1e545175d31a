//! Google OAuth session storage and refresh.
//!
//! One session file at ~/.config/tasksync/google/session.toml; `auth`
//! overwrites it, everything else loads it and refreshes when expired.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use google_calendar::{AccessToken, Client};
use serde::{Deserialize, Serialize};

use crate::app_config::{self, load_credentials};

pub struct Session {
    data: SessionData,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct SessionData {
    access_token: String,
    refresh_token: String,
    expires_at: DateTime<Utc>,
}

impl From<&AccessToken> for SessionData {
    fn from(tokens: &AccessToken) -> Self {
        SessionData {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            expires_at: Utc::now() + Duration::seconds(tokens.expires_in),
        }
    }
}

impl Session {
    fn path() -> Result<PathBuf> {
        Ok(app_config::base_dir()?.join("session.toml"))
    }

    pub fn exists() -> bool {
        Self::path().map(|p| p.exists()).unwrap_or(false)
    }

    /// Drop the stored session, forcing a fresh consent flow next time.
    pub fn remove() -> Result<()> {
        let path = Self::path()?;
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove session at {}", path.display()))?;
        }
        Ok(())
    }

    pub fn client(&self) -> Result<Client> {
        let creds = load_credentials()?;

        Ok(Client::new(
            creds.client_id,
            creds.client_secret,
            String::new(),
            self.data.access_token.clone(),
            self.data.refresh_token.clone(),
        ))
    }

    /// Load the session, refreshing it first if it expired.
    pub async fn load_valid() -> Result<Self> {
        let session = Self::load()?;

        if session.is_expired() {
            let mut session = session;
            session.refresh().await?;
            Ok(session)
        } else {
            Ok(session)
        }
    }

    fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            anyhow::bail!("Not authenticated with Google Calendar. Run `tasksync auth` first.");
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read session from {}", path.display()))?;

        let data: SessionData = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", path.display()))?;

        Ok(Session { data })
    }

    pub fn save(data: &SessionData) -> Result<Self> {
        let contents = toml::to_string_pretty(data).context("Failed to serialize session")?;

        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write session to {}", path.display()))?;

        // Owner-only (0600): the file contains OAuth tokens.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("Failed to set permissions on {}", path.display()))?;
        }

        Ok(Session { data: data.clone() })
    }

    fn is_expired(&self) -> bool {
        Utc::now() >= self.data.expires_at
    }

    async fn refresh(&mut self) -> Result<()> {
        let creds = load_credentials()?;

        let client = Client::new(
            creds.client_id,
            creds.client_secret,
            String::new(),
            self.data.access_token.clone(),
            self.data.refresh_token.clone(),
        );

        let mut tokens = client
            .refresh_access_token()
            .await
            .context("Failed to refresh token")?;

        // Google typically doesn't return a new refresh_token on refresh
        if tokens.refresh_token.is_empty() {
            tokens.refresh_token = self.data.refresh_token.clone();
        }

        self.data = SessionData::from(&tokens);
        Self::save(&self.data)?;

        Ok(())
    }
}
