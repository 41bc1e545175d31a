//! Google Calendar API calls, normalized to tasksync-core types and errors.

use google_calendar::Client;
use google_calendar::types::{MinAccessRole, OrderBy, SendUpdates};
use serde::{Deserialize, Serialize};

use tasksync_core::date_range::DateRange;
use tasksync_core::event::CalendarEvent;
use tasksync_core::{SyncError, SyncResult};

use crate::convert::{from_google_event, to_google_event};

/// A calendar as shown in the account's calendar list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarInfo {
    pub id: String,
    pub name: String,
    pub primary: bool,
}

fn remote_err(context: impl std::fmt::Display, e: impl std::fmt::Display) -> SyncError {
    SyncError::Remote(format!("{context}: {e}"))
}

/// Fetch the account's calendar list.
pub async fn list_calendars(client: &Client) -> SyncResult<Vec<CalendarInfo>> {
    let response = client
        .calendar_list()
        .list_all(MinAccessRole::default(), false, false)
        .await
        .map_err(|e| remote_err("failed to list calendars", e))?;

    Ok(response
        .body
        .into_iter()
        .filter(|c| !c.id.is_empty())
        .map(|c| CalendarInfo {
            id: c.id,
            name: if c.summary.is_empty() {
                "(unnamed)".to_string()
            } else {
                c.summary
            },
            primary: c.primary,
        })
        .collect())
}

/// Case-insensitive exact match against the account's calendar names.
pub async fn resolve_calendar_id(client: &Client, name: &str) -> SyncResult<String> {
    let wanted = name.to_lowercase();

    list_calendars(client)
        .await?
        .into_iter()
        .find(|c| c.name.to_lowercase() == wanted)
        .map(|c| c.id)
        .ok_or_else(|| SyncError::CalendarNotFound(name.to_string()))
}

/// List events inside the window, expanded to single instances, excluding
/// soft-deleted ones. Cancelled events that still appear are kept: a
/// cancelled event is the normal encoding of a deleted task and must stay
/// matchable.
pub async fn list_events(
    client: &Client,
    calendar_id: &str,
    range: &DateRange,
) -> SyncResult<Vec<CalendarEvent>> {
    let response = client
        .events()
        .list_all(
            calendar_id,
            "",                    // ical_uid
            0,                     // max_attendees
            OrderBy::default(),
            &[],                   // private_extended_property
            "",                    // free-text query
            &[],                   // shared_extended_property
            false,                 // show_deleted
            false,                 // show_hidden_invitations
            true,                  // single_events
            &range.to_rfc3339(),   // time_max
            &range.from_rfc3339(), // time_min
            "",                    // time_zone
            "",                    // updated_min
        )
        .await
        .map_err(|e| remote_err(format!("failed to list events for '{calendar_id}'"), e))?;

    Ok(response
        .body
        .into_iter()
        .filter_map(from_google_event)
        .collect())
}

/// Insert a new event and return it with the server-assigned id.
pub async fn create_event(
    client: &Client,
    calendar_id: &str,
    event: &CalendarEvent,
) -> SyncResult<CalendarEvent> {
    let mut google_event = to_google_event(event);
    google_event.id = String::new(); // the server assigns the id

    let response = client
        .events()
        .insert(
            calendar_id,
            0,
            0,
            false,
            SendUpdates::None,
            false,
            &google_event,
        )
        .await
        .map_err(|e| remote_err(format!("failed to create event '{}'", event.summary), e))?;

    from_google_event(response.body).ok_or_else(|| {
        SyncError::Remote(format!(
            "created event '{}' came back without usable times",
            event.summary
        ))
    })
}

/// Update an existing event in place.
pub async fn update_event(
    client: &Client,
    calendar_id: &str,
    event: &CalendarEvent,
) -> SyncResult<CalendarEvent> {
    if event.id.is_empty() {
        return Err(SyncError::MissingEventId(event.summary.clone()));
    }

    let google_event = to_google_event(event);

    let response = client
        .events()
        .update(
            calendar_id,
            &event.id,
            0,
            0,
            false,
            SendUpdates::None,
            false,
            &google_event,
        )
        .await
        .map_err(|e| remote_err(format!("failed to update event '{}'", event.summary), e))?;

    from_google_event(response.body).ok_or_else(|| {
        SyncError::Remote(format!(
            "updated event '{}' came back without usable times",
            event.summary
        ))
    })
}

/// Delete an event. A 410 means it is already gone, which is fine.
pub async fn delete_event(client: &Client, calendar_id: &str, event_id: &str) -> SyncResult<()> {
    let result = client
        .events()
        .delete(calendar_id, event_id, false, SendUpdates::None)
        .await;

    match result {
        Ok(_) => Ok(()),
        Err(e) => {
            let error_str = e.to_string();
            if error_str.contains("410") || error_str.contains("Gone") {
                Ok(())
            } else {
                Err(remote_err(format!("failed to delete event '{event_id}'"), e))
            }
        }
    }
}
