//! RDF vocabulary used by the emitted graphs.
//!
//! Terms are `const` so they can be used without allocation; the namespace
//! strings are also exported for prefix bindings in serialized output.

use oxrdf::{NamedNode, NamedNodeRef};

use crate::error::{CoreError, CoreResult};

pub const FOAF_NS: &str = "http://xmlns.com/foaf/0.1/";
pub const DCTERMS_NS: &str = "http://purl.org/dc/terms/";
pub const ICAL_NS: &str = "http://www.w3.org/2002/12/cal/ical#";
pub const GEO_NS: &str = "http://www.w3.org/2003/01/geo/wgs84_pos#";
pub const PIM_NS: &str = "https://ben.example/ns/pim#";
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";

/// Default namespace for entity subjects.
pub const DEFAULT_BASE_IRI: &str = "https://ben.example/pim/";

/// Prefix bindings written at the top of every Turtle output, in order.
/// The base IRI is bound to the empty prefix separately.
pub const PREFIXES: [(&str, &str); 8] = [
    ("pim", PIM_NS),
    ("foaf", FOAF_NS),
    ("ical", ICAL_NS),
    ("geo", GEO_NS),
    ("dcterms", DCTERMS_NS),
    ("xsd", XSD_NS),
    ("rdf", RDF_NS),
    ("rdfs", RDFS_NS),
];

pub mod foaf {
    use super::{FOAF_NS, NamedNodeRef};

    pub const PERSON: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked(const_str::concat!(FOAF_NS, "Person"));
    pub const NAME: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked(const_str::concat!(FOAF_NS, "name"));
    pub const GIVEN_NAME: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked(const_str::concat!(FOAF_NS, "givenName"));
    pub const FAMILY_NAME: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked(const_str::concat!(FOAF_NS, "familyName"));
    pub const MBOX: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked(const_str::concat!(FOAF_NS, "mbox"));
    pub const PHONE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked(const_str::concat!(FOAF_NS, "phone"));
    pub const HOMEPAGE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked(const_str::concat!(FOAF_NS, "homepage"));
}

pub mod dcterms {
    use super::{DCTERMS_NS, NamedNodeRef};

    pub const TITLE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked(const_str::concat!(DCTERMS_NS, "title"));
    pub const CREATED: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked(const_str::concat!(DCTERMS_NS, "created"));
    pub const SOURCE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked(const_str::concat!(DCTERMS_NS, "source"));
}

pub mod ical {
    use super::{ICAL_NS, NamedNodeRef};

    pub const VEVENT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked(const_str::concat!(ICAL_NS, "Vevent"));
    pub const DTSTART: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked(const_str::concat!(ICAL_NS, "dtstart"));
    pub const DTEND: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked(const_str::concat!(ICAL_NS, "dtend"));
    pub const LOCATION: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked(const_str::concat!(ICAL_NS, "location"));
    pub const DESCRIPTION: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked(const_str::concat!(ICAL_NS, "description"));
    pub const UID: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked(const_str::concat!(ICAL_NS, "uid"));
}

pub mod geo {
    use super::{GEO_NS, NamedNodeRef};

    pub const LAT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked(const_str::concat!(GEO_NS, "lat"));
    pub const LONG: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked(const_str::concat!(GEO_NS, "long"));
}

pub mod pim {
    use super::{NamedNodeRef, PIM_NS};

    pub const PLACE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked(const_str::concat!(PIM_NS, "Place"));
    pub const ORGANIZATION: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked(const_str::concat!(PIM_NS, "organization"));
    pub const TITLE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked(const_str::concat!(PIM_NS, "title"));
    pub const VISITED_ON: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked(const_str::concat!(PIM_NS, "visitedOn"));
    pub const LOCATION_NAME: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked(const_str::concat!(PIM_NS, "locationName"));
    pub const ADDRESS: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked(const_str::concat!(PIM_NS, "address"));
    pub const CONFIDENCE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked(const_str::concat!(PIM_NS, "confidence"));
}

/// ## Summary
/// Builds the subject IRI of an entity from the run's base IRI and the
/// allocated identifier.
///
/// ## Errors
/// Returns `CoreError::InvalidIri` if the concatenation is not a valid IRI.
pub fn entity_iri(base: &str, token: &str) -> CoreResult<NamedNode> {
    let iri = format!("{base}{token}");
    NamedNode::new(iri.as_str()).map_err(|e| CoreError::InvalidIri {
        iri,
        reason: e.to_string(),
    })
}

/// ## Summary
/// Checks that a base IRI is absolute and ends with a separator so that
/// appended identifiers stay inside its namespace.
///
/// ## Errors
/// Returns `CoreError::InvalidIri` if the IRI does not parse or lacks a
/// trailing `/` or `#`.
pub fn validate_base_iri(base: &str) -> CoreResult<()> {
    NamedNode::new(base).map_err(|e| CoreError::InvalidIri {
        iri: base.to_owned(),
        reason: e.to_string(),
    })?;

    if base.ends_with(['/', '#']) {
        Ok(())
    } else {
        Err(CoreError::InvalidIri {
            iri: base.to_owned(),
            reason: "base IRI must end with '/' or '#'".to_owned(),
        })
    }
}
