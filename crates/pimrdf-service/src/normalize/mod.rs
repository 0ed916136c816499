//! Field normalization.
//!
//! Turns raw parser output into typed records. A record missing its
//! identifying field normalizes to `None`; a malformed optional field is
//! dropped with a warning and the record is kept.

pub mod confidence;
pub mod event;
pub mod person;
pub mod place;

use std::fmt;

use pimrdf_rfc::record::Record;

pub use confidence::{confidence_score, score_confidence};
pub use event::{Event, normalize_event};
pub use person::{Person, StructuredName, normalize_person};
pub use place::{Coordinates, Place, normalize_place};

/// Entity categories produced by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Person,
    Event,
    Place,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Event => "event",
            Self::Place => "place",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record after normalization, ready for triple emission.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedRecord {
    Person(Person),
    Event(Event),
    Place(Place),
}

impl NormalizedRecord {
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Person(_) => EntityKind::Person,
            Self::Event(_) => EntityKind::Event,
            Self::Place(_) => EntityKind::Place,
        }
    }

    /// Human-readable name used to derive the entity identifier.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Self::Person(person) => Some(person.name.as_str()),
            Self::Event(event) => Some(event.title.as_str()),
            Self::Place(place) => place.name.as_deref(),
        }
    }
}

impl From<Person> for NormalizedRecord {
    fn from(value: Person) -> Self {
        Self::Person(value)
    }
}

impl From<Event> for NormalizedRecord {
    fn from(value: Event) -> Self {
        Self::Event(value)
    }
}

impl From<Place> for NormalizedRecord {
    fn from(value: Place) -> Self {
        Self::Place(value)
    }
}

/// ## Summary
/// Normalizes a parsed block according to its type.
///
/// Blocks other than `VCARD` and `VEVENT` are not convertible and yield
/// `None`.
#[must_use]
pub fn normalize_record(record: &Record) -> Option<NormalizedRecord> {
    match record.kind() {
        "VCARD" => normalize_person(record).map(NormalizedRecord::Person),
        "VEVENT" => normalize_event(record).map(NormalizedRecord::Event),
        other => {
            tracing::debug!(kind = %other, "No normalizer for record type");
            None
        }
    }
}

/// Copies a raw value as is. Whitespace-only values are absent.
pub(crate) fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_on_record_type() {
        let card = Record::new("VCARD").with("FN", "Ada Lovelace");
        let event = Record::new("VEVENT").with("SUMMARY", "Launch");
        let alarm = Record::new("VALARM").with("ACTION", "DISPLAY");

        let person = normalize_record(&card).unwrap();
        assert_eq!(person.kind(), EntityKind::Person);
        assert_eq!(person.display_name(), Some("Ada Lovelace"));

        let event = normalize_record(&event).unwrap();
        assert_eq!(event.kind(), EntityKind::Event);
        assert_eq!(event.display_name(), Some("Launch"));

        assert!(normalize_record(&alarm).is_none());
    }

    #[test]
    fn blank_values_are_absent() {
        assert_eq!(non_empty(Some("  ")), None);
        assert_eq!(non_empty(Some(" x ")), Some(" x ".to_string()));
        assert_eq!(non_empty(None), None);
    }

    #[test]
    fn values_are_not_trimmed() {
        let card = Record::new("VCARD").with("FN", " Jane");
        let person = normalize_record(&card).unwrap();
        assert_eq!(person.display_name(), Some(" Jane"));
    }

    #[test]
    fn kind_names() {
        assert_eq!(EntityKind::Place.to_string(), "place");
    }
}
