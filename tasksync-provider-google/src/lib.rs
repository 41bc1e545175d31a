//! Google Calendar backend for tasksync.
//!
//! `GoogleRemote` implements the `RemoteCalendar` gateway against the Google
//! Calendar API. Authentication is handled here (OAuth consent flow, token
//! storage, refresh); the reconciliation engine only ever receives an
//! already-authenticated handle.

pub mod api;
pub mod app_config;
pub mod auth;
pub mod convert;
pub mod session;

use async_trait::async_trait;
use google_calendar::Client;

use tasksync_core::date_range::DateRange;
use tasksync_core::event::CalendarEvent;
use tasksync_core::remote::RemoteCalendar;
use tasksync_core::SyncResult;

/// An authenticated Google Calendar connection.
pub struct GoogleRemote {
    client: Client,
}

impl GoogleRemote {
    /// Open a connection using the stored session, refreshing tokens if
    /// they expired. Fails if no session exists yet (run `auth` first).
    pub async fn connect() -> anyhow::Result<Self> {
        let session = session::Session::load_valid().await?;
        Ok(GoogleRemote {
            client: session.client()?,
        })
    }

    /// All calendars visible to the account.
    pub async fn calendars(&self) -> SyncResult<Vec<api::CalendarInfo>> {
        api::list_calendars(&self.client).await
    }
}

#[async_trait]
impl RemoteCalendar for GoogleRemote {
    async fn resolve_calendar_id(&self, name: &str) -> SyncResult<String> {
        api::resolve_calendar_id(&self.client, name).await
    }

    async fn list_events(
        &self,
        calendar_id: &str,
        range: &DateRange,
    ) -> SyncResult<Vec<CalendarEvent>> {
        api::list_events(&self.client, calendar_id, range).await
    }

    async fn create_event(
        &self,
        calendar_id: &str,
        event: &CalendarEvent,
    ) -> SyncResult<CalendarEvent> {
        api::create_event(&self.client, calendar_id, event).await
    }

    async fn update_event(
        &self,
        calendar_id: &str,
        event: &CalendarEvent,
    ) -> SyncResult<CalendarEvent> {
        api::update_event(&self.client, calendar_id, event).await
    }

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> SyncResult<()> {
        api::delete_event(&self.client, calendar_id, event_id).await
    }
}
