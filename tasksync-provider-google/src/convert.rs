//! Conversions between tasksync events and Google Calendar API events.

use chrono::{DateTime, Utc};
use google_calendar::types::{Event as GoogleEvent, EventDateTime};

use tasksync_core::event::{CalendarEvent, EventStatus};

/// Build the Google representation of an event.
pub fn to_google_event(event: &CalendarEvent) -> GoogleEvent {
    let status = match event.status {
        EventStatus::Confirmed => "confirmed",
        EventStatus::Cancelled => "cancelled",
    };

    GoogleEvent {
        id: event.id.clone(),
        summary: event.summary.clone(),
        description: event.description.clone(),
        status: status.to_string(),
        start: Some(to_google_time(&event.start)),
        end: Some(to_google_time(&event.end)),
        ..Default::default()
    }
}

fn to_google_time(stamp: &str) -> EventDateTime {
    EventDateTime {
        date: None,
        date_time: DateTime::parse_from_rfc3339(stamp)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        time_zone: String::new(),
    }
}

/// Normalize a Google API event. Returns `None` for events tasksync can
/// never own: missing id, or all-day/dateless times (tasksync only creates
/// timed events).
pub fn from_google_event(event: GoogleEvent) -> Option<CalendarEvent> {
    if event.id.is_empty() {
        return None;
    }

    let start = event.start.as_ref().and_then(|t| t.date_time)?;
    let end = event.end.as_ref().and_then(|t| t.date_time)?;

    let status = match event.status.as_str() {
        "cancelled" => EventStatus::Cancelled,
        _ => EventStatus::Confirmed,
    };

    Some(CalendarEvent {
        id: event.id,
        summary: event.summary,
        description: event.description,
        start: start.to_rfc3339(),
        end: end.to_rfc3339(),
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> CalendarEvent {
        CalendarEvent {
            id: "ev-1".to_string(),
            summary: "Write report".to_string(),
            description: "Source: taskwarrior, ID: abc-1, Status: pending".to_string(),
            start: "2025-06-01T10:00:00+00:00".to_string(),
            end: "2025-06-01T10:30:00+00:00".to_string(),
            status: EventStatus::Confirmed,
        }
    }

    #[test]
    fn google_round_trip_preserves_the_identity_fields() {
        let google = to_google_event(&sample_event());
        assert_eq!(google.status, "confirmed");
        assert!(google.start.as_ref().unwrap().date_time.is_some());

        let back = from_google_event(google).unwrap();
        assert_eq!(back.id, "ev-1");
        assert_eq!(back.summary, "Write report");
        assert_eq!(back.description, sample_event().description);
        assert_eq!(back.status, EventStatus::Confirmed);
    }

    #[test]
    fn cancelled_status_maps_both_ways() {
        let mut event = sample_event();
        event.status = EventStatus::Cancelled;

        let google = to_google_event(&event);
        assert_eq!(google.status, "cancelled");
        assert_eq!(
            from_google_event(google).unwrap().status,
            EventStatus::Cancelled
        );
    }

    #[test]
    fn all_day_events_are_not_ours() {
        let mut google = to_google_event(&sample_event());
        google.start.as_mut().unwrap().date_time = None;

        assert!(from_google_event(google).is_none());
    }

    #[test]
    fn events_without_id_are_dropped() {
        let mut google = to_google_event(&sample_event());
        google.id = String::new();

        assert!(from_google_event(google).is_none());
    }
}
