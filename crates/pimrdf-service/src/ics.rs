//! Turtle to iCalendar export.
//!
//! Events are read from a graph using either the application's own terms
//! (`<base>Event`, `<base>date`, `<base>location`, `<base>hasTag`) or the
//! iCalendar vocabulary written by the converters.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use oxrdf::vocab::rdf;
use oxrdf::{Graph, NamedNode, NamedNodeRef, SubjectRef, TermRef, Triple};
use oxrdfio::{RdfFormat, RdfParser};
use pimrdf_core::vocab::{dcterms, ical, validate_base_iri};
use pimrdf_rfc::datetime::Timestamp;
use pimrdf_rfc::ical::{CalendarEvent, serialize_calendar};

use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Parses a Turtle file into a graph, resolving relative IRIs against
/// `base_iri`.
///
/// ## Errors
/// Returns `ServiceError::ReadFile` if the file cannot be opened and
/// `ServiceError::RdfParse` if it is not valid Turtle.
pub fn load_turtle(path: &Path, base_iri: &str) -> ServiceResult<Graph> {
    let file = File::open(path).map_err(|source| ServiceError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let mut graph = Graph::new();
    for quad in RdfParser::from_format(RdfFormat::Turtle)
        .with_base_iri(base_iri)?
        .for_reader(file)
    {
        graph.insert(&Triple::from(quad?));
    }

    tracing::info!(file = %path.display(), triples = graph.len(), "Loaded Turtle file");
    Ok(graph)
}

struct EventTerms {
    event: NamedNode,
    date: NamedNode,
    location: NamedNode,
    has_tag: NamedNode,
}

impl EventTerms {
    fn new(base_iri: &str) -> ServiceResult<Self> {
        let term = |local: &str| NamedNode::new(format!("{base_iri}{local}"));
        Ok(Self {
            event: term("Event")?,
            date: term("date")?,
            location: term("location")?,
            has_tag: term("hasTag")?,
        })
    }
}

/// ## Summary
/// Collects every event in `graph`, ordered by subject.
///
/// Dates that cannot be parsed are left out with a warning.
///
/// ## Errors
/// Returns `ServiceError::InvalidIri` if `base_iri` cannot be used to build
/// the event vocabulary.
pub fn extract_events(graph: &Graph, base_iri: &str) -> ServiceResult<Vec<CalendarEvent>> {
    let terms = EventTerms::new(base_iri)?;

    let mut subjects: Vec<SubjectRef<'_>> = graph
        .subjects_for_predicate_object(rdf::TYPE, terms.event.as_ref())
        .chain(graph.subjects_for_predicate_object(rdf::TYPE, ical::VEVENT))
        .collect();
    subjects.sort_by_cached_key(ToString::to_string);
    subjects.dedup();

    let events = subjects
        .into_iter()
        .map(|subject| {
            let first = |predicates: &[NamedNodeRef<'_>]| {
                predicates
                    .iter()
                    .find_map(|p| graph.object_for_subject_predicate(subject, *p))
                    .map(term_text)
            };

            let start = first(&[terms.date.as_ref(), ical::DTSTART]).and_then(|raw| {
                Timestamp::parse(&raw)
                    .inspect_err(|e| {
                        tracing::warn!(
                            event = %subject,
                            value = %raw,
                            error = %e,
                            "Ignoring unparseable event date"
                        );
                    })
                    .ok()
            });

            let mut tags: Vec<String> = graph
                .objects_for_subject_predicate(subject, terms.has_tag.as_ref())
                .map(|tag| tag_label(&term_text(tag)))
                .collect();
            tags.sort();
            tags.dedup();

            let description = if tags.is_empty() {
                first(&[ical::DESCRIPTION])
            } else {
                Some(format!("Tags: {}", tags.join(", ")))
            };

            CalendarEvent {
                uid: event_uid(subject),
                summary: first(&[dcterms::TITLE]).unwrap_or_default(),
                start,
                location: first(&[terms.location.as_ref(), ical::LOCATION]),
                description,
            }
        })
        .collect();

    Ok(events)
}

/// ## Summary
/// Reads events from a Turtle file and renders them as an iCalendar
/// document stamped with `stamp`.
///
/// ## Errors
/// Returns `ServiceError::NoEvents` if the file describes no events, or any
/// error from loading the file.
pub fn export_calendar(
    input: &Path,
    base_iri: &str,
    stamp: DateTime<Utc>,
) -> ServiceResult<String> {
    validate_base_iri(base_iri)?;
    let graph = load_turtle(input, base_iri)?;
    let events = extract_events(&graph, base_iri)?;

    if events.is_empty() {
        return Err(ServiceError::NoEvents(input.to_path_buf()));
    }
    tracing::info!(events = events.len(), "Exporting events");

    Ok(serialize_calendar(&events, stamp))
}

fn term_text(term: TermRef<'_>) -> String {
    match term {
        TermRef::Literal(literal) => literal.value().to_owned(),
        TermRef::NamedNode(node) => node.as_str().to_owned(),
        other => other.to_string(),
    }
}

/// `http://example.org/pim/event-1` becomes `example.org-pim-event-1`.
fn event_uid(subject: SubjectRef<'_>) -> String {
    let SubjectRef::NamedNode(node) = subject else {
        return subject.to_string();
    };
    let iri = node.as_str();
    iri.strip_prefix("https://")
        .or_else(|| iri.strip_prefix("http://"))
        .unwrap_or(iri)
        .replace('/', "-")
}

/// Last path segment, dashes as spaces, each word capitalized.
fn tag_label(tag: &str) -> String {
    let segment = tag.rsplit('/').next().unwrap_or(tag).replace('-', " ");
    title_case(&segment)
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut after_letter = false;
    for c in text.chars() {
        if after_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        after_letter = c.is_alphabetic();
    }
    out
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::TimeZone;
    use pimrdf_core::vocab::DEFAULT_BASE_IRI;

    use super::*;

    const EVENTS: &str = r#"
@prefix : <https://ben.example/pim/> .
@prefix dcterms: <http://purl.org/dc/terms/> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .

:event-2 a :Event ;
    dcterms:title "Team sync, weekly" ;
    :date "2025-09-15T10:00:00+02:00"^^xsd:dateTime ;
    :location "Room 4" .

:event-1 a :Event ;
    dcterms:title "Conference" ;
    :date "2025-10-01"^^xsd:date ;
    :hasTag <https://ben.example/tags/work>, <https://ben.example/tags/machine-learning> .
"#;

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap()
    }

    fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn extracts_events_in_subject_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "events.ttl", EVENTS);
        let graph = load_turtle(&path, DEFAULT_BASE_IRI).unwrap();

        let events = extract_events(&graph, DEFAULT_BASE_IRI).unwrap();
        assert_eq!(events.len(), 2);

        let conference = &events[0];
        assert_eq!(conference.uid, "ben.example-pim-event-1");
        assert_eq!(conference.summary, "Conference");
        assert!(conference.start.unwrap().is_date());
        assert_eq!(
            conference.description.as_deref(),
            Some("Tags: Machine Learning, Work")
        );

        let sync = &events[1];
        assert_eq!(sync.start.unwrap().to_ical(), "20250915T100000Z");
        assert_eq!(sync.location.as_deref(), Some("Room 4"));
        assert_eq!(sync.description, None);
    }

    #[test]
    fn reads_ical_vocabulary() {
        let turtle = r#"
@prefix ical: <http://www.w3.org/2002/12/cal/ical#> .
@prefix dcterms: <http://purl.org/dc/terms/> .
<https://ben.example/pim/event-takeout-test-event> a ical:Vevent ;
    dcterms:title "Test Event" ;
    ical:dtstart "2025-09-15T10:00:00Z" ;
    ical:location "Lab" ;
    ical:description "Bring laptop" .
"#;
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "events-takeout.ttl", turtle);
        let graph = load_turtle(&path, DEFAULT_BASE_IRI).unwrap();

        let events = extract_events(&graph, DEFAULT_BASE_IRI).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].uid, "ben.example-pim-event-takeout-test-event");
        assert_eq!(events[0].location.as_deref(), Some("Lab"));
        assert_eq!(events[0].description.as_deref(), Some("Bring laptop"));
    }

    #[test]
    fn export_renders_calendar() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "events.ttl", EVENTS);

        let ics = export_calendar(&path, DEFAULT_BASE_IRI, stamp()).unwrap();
        assert!(ics.contains("UID:ben.example-pim-event-1\r\n"));
        assert!(ics.contains("DTSTART;VALUE=DATE:20251001\r\n"));
        assert!(ics.contains("DTSTART:20250915T100000Z\r\n"));
        assert!(ics.contains("SUMMARY:Team sync\\, weekly\r\n"));
        assert!(ics.contains("DESCRIPTION:Tags: Machine Learning\\, Work\r\n"));
        assert!(ics.contains("DTSTAMP:20250102T030405Z\r\n"));
    }

    #[test]
    fn no_events_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "people.ttl",
            "<https://ben.example/pim/p> a <http://xmlns.com/foaf/0.1/Person> .\n",
        );

        let err = export_calendar(&path, DEFAULT_BASE_IRI, stamp()).unwrap_err();
        assert!(matches!(err, ServiceError::NoEvents(_)));
    }

    #[test]
    fn invalid_turtle_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "bad.ttl", "this is { not turtle");

        let err = load_turtle(&path, DEFAULT_BASE_IRI).unwrap_err();
        assert!(matches!(err, ServiceError::RdfParse(_)));
    }

    #[test]
    fn tag_labels() {
        assert_eq!(tag_label("https://ben.example/pim/tag-work"), "Tag Work");
        assert_eq!(tag_label("https://ben.example/pim/machine-LEARNING"), "Machine Learning");
        assert_eq!(title_case("o'neil"), "O'Neil");
    }
}
