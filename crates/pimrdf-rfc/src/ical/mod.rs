//! iCalendar output (RFC 5545) for the ICS bridge.

pub mod build;

pub use build::{CalendarEvent, escape_text, fold_line, serialize_calendar};
