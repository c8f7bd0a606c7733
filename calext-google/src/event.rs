use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Google's alias for the user's main calendar
pub const PRIMARY_CALENDAR_ID: &str = "primary";

pub const MAX_UPCOMING_EVENTS: i64 = 10;

/// A calendar event exactly as Google returned it.
///
/// calext never interprets event fields, it only hands them to the extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarEvent(pub serde_json::Value);

/// Parameters of an `events.list` call.
///
/// Results are always ordered by start time with recurring events
/// expanded into single instances.
///
/// `time_min` goes beyond the calendar id, max results, order and expansion
/// the extension's previous backend sent: it keeps past events out of the
/// ten returned.
#[derive(Debug, Clone, PartialEq)]
pub struct EventQuery {
    pub calendar_id: String,
    pub max_results: i64,
    pub time_min: DateTime<Utc>,
}

impl EventQuery {
    /// The next few events on the primary calendar, starting from `now`.
    pub fn upcoming(now: DateTime<Utc>) -> Self {
        Self {
            calendar_id: PRIMARY_CALENDAR_ID.to_string(),
            max_results: MAX_UPCOMING_EVENTS,
            time_min: now,
        }
    }
}
