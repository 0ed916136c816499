//! Format-level code for the PIM RDF toolkit.
//!
//! - [`record`] - permissive line-oriented vCard / iCalendar record parser
//! - [`datetime`] - date and date-time normalization to ISO 8601 UTC
//! - [`location`] - location-history JSON payloads
//! - [`ical`] - iCalendar output for the ICS bridge

pub mod datetime;
pub mod error;
pub mod ical;
pub mod location;
pub mod record;
