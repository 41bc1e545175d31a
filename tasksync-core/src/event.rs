//! Provider-neutral calendar event types.
//!
//! Backends convert their API responses into these types; the reconciler
//! works exclusively with them.

use serde::{Deserialize, Serialize};

/// A calendar event, as held by the remote calendar. Copies on this side are
/// ephemeral and non-authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Remote-assigned id; empty until the event exists on the calendar.
    pub id: String,
    /// Task description, possibly prefixed with a status glyph.
    pub summary: String,
    /// Free text carrying the embedded identity token.
    pub description: String,
    /// RFC3339 instants as the remote hands them back. Parsed only at
    /// comparison time, so one malformed timestamp fails one task, not the
    /// whole listing.
    pub start: String,
    pub end: String,
    pub status: EventStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Confirmed,
    Cancelled,
}
