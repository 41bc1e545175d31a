//! Remote calendar gateway.

use async_trait::async_trait;

use crate::date_range::DateRange;
use crate::error::SyncResult;
use crate::event::CalendarEvent;

/// Operations a calendar backend must provide.
///
/// Implementations are handed in already authenticated; token lifecycle is
/// the backend's problem. Every call is one blocking round trip with no
/// retry; callers decide whether a failure is fatal or skips one task.
#[async_trait]
pub trait RemoteCalendar {
    /// Resolve a calendar's display name to its backend id. Matching is
    /// case-insensitive and exact.
    async fn resolve_calendar_id(&self, name: &str) -> SyncResult<String>;

    /// List events overlapping the window, expanded to single instances and
    /// excluding soft-deleted ones. No events is an empty list, not an error.
    async fn list_events(
        &self,
        calendar_id: &str,
        range: &DateRange,
    ) -> SyncResult<Vec<CalendarEvent>>;

    /// Insert a new event and return it with its remote-assigned id.
    async fn create_event(
        &self,
        calendar_id: &str,
        event: &CalendarEvent,
    ) -> SyncResult<CalendarEvent>;

    /// Update an existing event in place. Fails with `MissingEventId` when
    /// the event carries no remote id.
    async fn update_event(
        &self,
        calendar_id: &str,
        event: &CalendarEvent,
    ) -> SyncResult<CalendarEvent>;

    /// Remove an event. Only the orphan-pruning path calls this.
    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> SyncResult<()>;
}
