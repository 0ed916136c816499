//! Contacts from `VCARD` records.

use pimrdf_rfc::record::Record;

use super::non_empty;

/// Components of the structured `N` property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredName {
    pub family: Option<String>,
    pub given: Option<String>,
    pub additional: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

impl StructuredName {
    /// Splits `family;given;additional;prefix;suffix`. Empty or missing
    /// segments are absent.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let mut parts = value.split(';').map(|part| non_empty(Some(part)));
        let mut next = || parts.next().flatten();
        Self {
            family: next(),
            given: next(),
            additional: next(),
            prefix: next(),
            suffix: next(),
        }
    }

    /// "Given Family", or whichever of the two is present.
    #[must_use]
    pub fn display(&self) -> Option<String> {
        let joined = [self.given.as_deref(), self.family.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        (!joined.is_empty()).then_some(joined)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub structured_name: Option<StructuredName>,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub organization: Option<String>,
    pub title: Option<String>,
    pub homepage: Option<String>,
    pub note: Option<String>,
}

/// ## Summary
/// Builds a [`Person`] from a `VCARD` record.
///
/// The name comes from `FN`, or from the given and family parts of `N` when
/// `FN` is missing. Returns `None` when neither yields a name.
#[must_use]
pub fn normalize_person(record: &Record) -> Option<Person> {
    let structured_name = record.first("N").map(StructuredName::parse);

    let name = non_empty(record.first("FN"))
        .or_else(|| structured_name.as_ref().and_then(StructuredName::display));
    let Some(name) = name else {
        tracing::warn!(properties = record.len(), "Skipping contact without a name");
        return None;
    };

    let collect = |key: &str| -> Vec<String> {
        record
            .values(key)
            .filter_map(|value| non_empty(Some(value)))
            .collect()
    };

    Some(Person {
        name,
        structured_name,
        emails: collect("EMAIL"),
        phones: collect("TEL"),
        organization: non_empty(record.first("ORG")),
        title: non_empty(record.first("TITLE")),
        homepage: non_empty(record.first("URL")),
        note: non_empty(record.first("NOTE")),
    })
}
