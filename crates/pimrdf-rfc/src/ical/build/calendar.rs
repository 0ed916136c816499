//! `VCALENDAR` document serialization.

use chrono::{DateTime, Utc};

use super::escape::escape_text;
use super::fold::fold_line;
use crate::datetime::Timestamp;

pub const PRODUCT_ID: &str = "-//PIM RDF//ICS Bridge//EN";

/// One `VEVENT` to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub uid: String,
    pub summary: String,
    pub start: Option<Timestamp>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// ## Summary
/// Serializes events into an iCalendar document.
///
/// `stamp` is written as `DTSTAMP` and `CREATED` of every event. Lines are
/// folded and terminated with CRLF.
#[must_use]
pub fn serialize_calendar(events: &[CalendarEvent], stamp: DateTime<Utc>) -> String {
    let stamp = Timestamp::DateTime(stamp).to_ical();
    let mut lines: Vec<String> = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{PRODUCT_ID}"),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
    ];

    for event in events {
        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("UID:{}", event.uid));

        match event.start {
            Some(start @ Timestamp::Date(_)) => {
                lines.push(format!("DTSTART;VALUE=DATE:{}", start.to_ical()));
            }
            Some(start @ Timestamp::DateTime(_)) => {
                lines.push(format!("DTSTART:{}", start.to_ical()));
            }
            None => {}
        }

        lines.push(format!("SUMMARY:{}", escape_text(&event.summary)));

        if let Some(location) = &event.location {
            lines.push(format!("LOCATION:{}", escape_text(location)));
        }
        if let Some(description) = &event.description {
            lines.push(format!("DESCRIPTION:{}", escape_text(description)));
        }

        lines.push(format!("DTSTAMP:{stamp}"));
        lines.push(format!("CREATED:{stamp}"));
        lines.push("END:VEVENT".to_string());
    }

    lines.push("END:VCALENDAR".to_string());

    let mut output = String::new();
    for line in &lines {
        output.push_str(&fold_line(line));
        output.push_str("\r\n");
    }
    output
}
