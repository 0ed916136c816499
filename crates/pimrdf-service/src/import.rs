//! Single-file vCard import.

use std::fs;
use std::path::Path;

use pimrdf_rfc::record::PermissiveParser;

use crate::convert::ConversionRun;
use crate::error::{ServiceError, ServiceResult};
use crate::output::write_turtle;

pub const CONTACT_PREFIX: &str = "contact";
pub const DEFAULT_OUTPUT: &str = "imported-contacts.ttl";

/// ## Summary
/// Reads a `.vcf` file and converts its contacts into a graph.
///
/// Subjects are `<base_iri>contact-...`; no provenance triples are added.
///
/// ## Errors
/// Returns `ServiceError::ReadFile` if the file cannot be read as UTF-8, or
/// a base IRI error from [`ConversionRun::new`].
pub fn import_vcf_file(path: &Path, base_iri: &str) -> ServiceResult<ConversionRun> {
    let content = fs::read_to_string(path).map_err(|source| ServiceError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let mut run = ConversionRun::new(base_iri, CONTACT_PREFIX, None)?;
    run.add_records(&PermissiveParser::vcard(), &content)?;
    tracing::info!(
        file = %path.display(),
        contacts = run.entities(),
        skipped = run.skipped(),
        "Parsed vCard file"
    );
    Ok(run)
}

/// ## Summary
/// Imports `input` and writes the contacts as Turtle to `output`.
///
/// Returns the number of contacts written. An input without contacts
/// writes nothing.
///
/// ## Errors
/// Returns any error from [`import_vcf_file`] or [`write_turtle`].
pub fn import_vcf(input: &Path, output: &Path, base_iri: &str) -> ServiceResult<usize> {
    let run = import_vcf_file(input, base_iri)?;
    let contacts = run.entities();

    if contacts == 0 {
        tracing::warn!(file = %input.display(), "No contacts found, nothing written");
        return Ok(0);
    }

    write_turtle(output, run.graph(), run.base_iri())?;
    Ok(contacts)
}
