//! Turtle serialization.
//!
//! Graphs are serialized to memory first and written in a single call, so
//! a failed run never leaves a truncated file behind.

use std::fs;
use std::path::Path;

use oxrdf::{Graph, TripleRef};
use oxrdfio::{RdfFormat, RdfSerializer};
use pimrdf_core::vocab::PREFIXES;

use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Serializes `graph` as Turtle, binding `base_iri` to the empty prefix
/// along with the standard vocabulary prefixes.
///
/// Triples are sorted so that the output is stable across runs.
///
/// ## Errors
/// Returns `ServiceError::InvalidIri` if `base_iri` is not a valid IRI.
pub fn serialize_turtle(graph: &Graph, base_iri: &str) -> ServiceResult<Vec<u8>> {
    let mut serializer =
        RdfSerializer::from_format(RdfFormat::Turtle).with_prefix("", base_iri)?;
    for (name, iri) in PREFIXES {
        serializer = serializer.with_prefix(name, iri)?;
    }

    let mut triples: Vec<TripleRef<'_>> = graph.iter().collect();
    triples.sort_by_cached_key(|t| {
        (
            t.subject.to_string(),
            t.predicate.as_str(),
            t.object.to_string(),
        )
    });

    let mut writer = serializer.for_writer(Vec::new());
    for triple in triples {
        writer.serialize_triple(triple)?;
    }
    Ok(writer.finish()?)
}

/// ## Summary
/// Writes `graph` as Turtle to `path`, creating parent directories.
///
/// ## Errors
/// Returns `ServiceError::WriteFile` if the directory or file cannot be
/// written, or any error from [`serialize_turtle`].
pub fn write_turtle(path: &Path, graph: &Graph, base_iri: &str) -> ServiceResult<()> {
    let bytes = serialize_turtle(graph, base_iri)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ServiceError::WriteFile {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, &bytes).map_err(|source| ServiceError::WriteFile {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), triples = graph.len(), "Wrote Turtle file");
    Ok(())
}
