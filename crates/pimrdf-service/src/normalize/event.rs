//! Events from `VEVENT` records.

use pimrdf_rfc::datetime::Timestamp;
use pimrdf_rfc::record::Record;

use super::non_empty;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub title: String,
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub uid: Option<String>,
}

/// ## Summary
/// Builds an [`Event`] from a `VEVENT` record.
///
/// `SUMMARY` is required. `DTSTART` and `DTEND` that do not parse are
/// dropped with a warning.
#[must_use]
pub fn normalize_event(record: &Record) -> Option<Event> {
    let Some(title) = non_empty(record.first("SUMMARY")) else {
        tracing::warn!(
            uid = record.first("UID").unwrap_or_default(),
            "Skipping event without a summary"
        );
        return None;
    };

    Some(Event {
        start: timestamp(record, "DTSTART", &title),
        end: timestamp(record, "DTEND", &title),
        location: non_empty(record.first("LOCATION")),
        description: non_empty(record.first("DESCRIPTION")),
        uid: non_empty(record.first("UID")),
        title,
    })
}

fn timestamp(record: &Record, key: &str, title: &str) -> Option<Timestamp> {
    let raw = non_empty(record.first(key))?;
    match Timestamp::parse(&raw) {
        Ok(ts) => Some(ts),
        Err(e) => {
            tracing::warn!(event = %title, property = key, error = %e, "Dropping unparseable date");
            None
        }
    }
}
