//! Triple emission.
//!
//! Maps a [`NormalizedRecord`] onto the fixed vocabulary in
//! [`pimrdf_core::vocab`]. Nothing here performs I/O; triples go straight
//! into the caller's graph.

use chrono::{DateTime, Utc};
use oxrdf::vocab::{rdf, rdfs, xsd};
use oxrdf::{Graph, Literal, NamedNode, NamedNodeRef, Term, Triple};
use pimrdf_core::vocab::{dcterms, foaf, geo, ical, pim};
use pimrdf_rfc::datetime::Timestamp;

use crate::normalize::{Event, NormalizedRecord, Person, Place};

/// Where a record came from and when it was converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    pub source: String,
    pub created: DateTime<Utc>,
}

impl Provenance {
    #[must_use]
    pub fn new(source: impl Into<String>, created: DateTime<Utc>) -> Self {
        Self {
            source: source.into(),
            created,
        }
    }
}

/// ## Summary
/// Inserts the triples describing `record` under `subject`.
///
/// Returns the number of triples that were new to the graph. Fields whose
/// value cannot be turned into an IRI are skipped with a warning.
pub fn emit_record(
    record: &NormalizedRecord,
    subject: &NamedNode,
    provenance: Option<&Provenance>,
    graph: &mut Graph,
) -> usize {
    let mut emitter = Emitter {
        subject,
        graph,
        inserted: 0,
    };

    match record {
        NormalizedRecord::Person(person) => emitter.person(person),
        NormalizedRecord::Event(event) => emitter.event(event),
        NormalizedRecord::Place(place) => emitter.place(place),
    }

    if let Some(provenance) = provenance {
        emitter.add(
            dcterms::CREATED,
            timestamp_literal(Timestamp::DateTime(provenance.created)),
        );
        emitter.add(
            dcterms::SOURCE,
            Literal::new_simple_literal(&provenance.source),
        );
    }

    emitter.inserted
}

struct Emitter<'a> {
    subject: &'a NamedNode,
    graph: &'a mut Graph,
    inserted: usize,
}

impl Emitter<'_> {
    fn add(&mut self, predicate: NamedNodeRef<'_>, object: impl Into<Term>) {
        let triple = Triple::new(self.subject.clone(), predicate.into_owned(), object);
        if self.graph.insert(&triple) {
            self.inserted += 1;
        }
    }

    fn text(&mut self, predicate: NamedNodeRef<'_>, value: Option<&str>) {
        if let Some(value) = value {
            self.add(predicate, Literal::new_simple_literal(value));
        }
    }

    fn iri(&mut self, predicate: NamedNodeRef<'_>, iri: String) {
        match NamedNode::new(iri.as_str()) {
            Ok(node) => self.add(predicate, node),
            Err(e) => tracing::warn!(
                subject = %self.subject,
                predicate = %predicate,
                value = %iri,
                error = %e,
                "Skipping field that is not a valid IRI"
            ),
        }
    }

    fn person(&mut self, person: &Person) {
        self.add(rdf::TYPE, foaf::PERSON.into_owned());
        self.text(rdfs::LABEL, Some(person.name.as_str()));
        self.text(foaf::NAME, Some(person.name.as_str()));

        if let Some(n) = &person.structured_name {
            self.text(foaf::GIVEN_NAME, n.given.as_deref());
            self.text(foaf::FAMILY_NAME, n.family.as_deref());
        }

        for email in &person.emails {
            self.iri(foaf::MBOX, format!("mailto:{email}"));
        }
        for phone in &person.phones {
            let number: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
            self.iri(foaf::PHONE, format!("tel:{number}"));
        }

        self.text(pim::ORGANIZATION, person.organization.as_deref());
        self.text(pim::TITLE, person.title.as_deref());
        if let Some(homepage) = &person.homepage {
            self.iri(foaf::HOMEPAGE, homepage.clone());
        }
        self.text(rdfs::COMMENT, person.note.as_deref());
    }

    fn event(&mut self, event: &Event) {
        self.add(rdf::TYPE, ical::VEVENT.into_owned());
        self.text(dcterms::TITLE, Some(event.title.as_str()));

        if let Some(start) = event.start {
            self.add(ical::DTSTART, timestamp_literal(start));
        }
        if let Some(end) = event.end {
            self.add(ical::DTEND, timestamp_literal(end));
        }

        self.text(ical::LOCATION, event.location.as_deref());
        self.text(ical::DESCRIPTION, event.description.as_deref());
        self.text(ical::UID, event.uid.as_deref());
    }

    fn place(&mut self, place: &Place) {
        self.add(rdf::TYPE, pim::PLACE.into_owned());

        if let Some(coordinates) = place.coordinates {
            self.add(
                geo::LAT,
                Literal::new_typed_literal(coordinates.latitude.to_string(), xsd::DOUBLE),
            );
            self.add(
                geo::LONG,
                Literal::new_typed_literal(coordinates.longitude.to_string(), xsd::DOUBLE),
            );
        }
        if let Some(visited) = place.visited {
            self.add(pim::VISITED_ON, timestamp_literal(visited));
        }

        self.text(pim::LOCATION_NAME, place.name.as_deref());
        self.text(pim::ADDRESS, place.address.as_deref());

        if let Some(confidence) = place.confidence {
            self.add(
                pim::CONFIDENCE,
                Literal::new_typed_literal(confidence.to_string(), xsd::DECIMAL),
            );
        }
    }
}

fn timestamp_literal(value: Timestamp) -> Literal {
    let datatype = if value.is_date() {
        xsd::DATE
    } else {
        xsd::DATE_TIME
    };
    Literal::new_typed_literal(value.to_iso8601(), datatype)
}
