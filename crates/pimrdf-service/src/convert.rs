//! One conversion run: allocator, provenance and the graph being built.

use oxrdf::{Graph, NamedNode};
use pimrdf_core::vocab::{entity_iri, validate_base_iri};
use pimrdf_rfc::location::LocationHistory;
use pimrdf_rfc::record::RecordParser;

use crate::allocate::EntityAllocator;
use crate::emit::{Provenance, emit_record};
use crate::error::ServiceResult;
use crate::normalize::{NormalizedRecord, normalize_place, normalize_record};

/// Accumulates the entities of one category into a single graph.
///
/// Each run owns its allocator, so identifiers are unique within the run
/// and two runs never share counter state.
#[derive(Debug)]
pub struct ConversionRun {
    base_iri: String,
    allocator: EntityAllocator,
    provenance: Option<Provenance>,
    graph: Graph,
    entities: usize,
    skipped: usize,
}

impl ConversionRun {
    /// ## Summary
    /// Starts a run that mints subjects as `<base_iri><prefix>-...`.
    ///
    /// ## Errors
    /// Returns `ServiceError::CoreError` if `base_iri` is not a usable
    /// namespace IRI.
    pub fn new(
        base_iri: &str,
        prefix: &str,
        provenance: Option<Provenance>,
    ) -> ServiceResult<Self> {
        validate_base_iri(base_iri)?;
        Ok(Self {
            base_iri: base_iri.to_owned(),
            allocator: EntityAllocator::new(prefix),
            provenance,
            graph: Graph::new(),
            entities: 0,
            skipped: 0,
        })
    }

    /// ## Summary
    /// Allocates a subject for `record` and emits its triples.
    ///
    /// ## Errors
    /// Returns `ServiceError::CoreError` if the allocated identifier does not
    /// form a valid IRI with the base.
    pub fn add(&mut self, record: &NormalizedRecord) -> ServiceResult<NamedNode> {
        let token = self.allocator.allocate(record.display_name());
        let subject = entity_iri(&self.base_iri, &token)?;
        let triples = emit_record(
            record,
            &subject,
            self.provenance.as_ref(),
            &mut self.graph,
        );
        tracing::trace!(%subject, kind = %record.kind(), triples, "Emitted entity");
        self.entities += 1;
        Ok(subject)
    }

    /// ## Summary
    /// Parses `input`, normalizes each record and adds it to the graph.
    ///
    /// Returns the number of entities added. Records that fail
    /// normalization are counted as skipped.
    ///
    /// ## Errors
    /// Propagates errors from [`ConversionRun::add`].
    pub fn add_records<P: RecordParser>(
        &mut self,
        parser: &P,
        input: &str,
    ) -> ServiceResult<usize> {
        let mut added = 0;
        for record in parser.records(input) {
            match normalize_record(&record) {
                Some(normalized) => {
                    self.add(&normalized)?;
                    added += 1;
                }
                None => self.skipped += 1,
            }
        }
        Ok(added)
    }

    /// ## Summary
    /// Adds places from a decoded location history, reading at most `limit`
    /// entries when a limit is given.
    ///
    /// ## Errors
    /// Propagates errors from [`ConversionRun::add`].
    pub fn add_locations(
        &mut self,
        history: &LocationHistory,
        limit: Option<usize>,
    ) -> ServiceResult<usize> {
        self.skipped += history.skipped;

        let take = limit.unwrap_or(usize::MAX);
        if history.entries.len() > take {
            tracing::info!(
                total = history.entries.len(),
                limit = take,
                "Truncating location history"
            );
        }

        let mut added = 0;
        for entry in history.entries.iter().take(take) {
            match normalize_place(entry) {
                Some(place) => {
                    self.add(&NormalizedRecord::Place(place))?;
                    added += 1;
                }
                None => self.skipped += 1,
            }
        }
        Ok(added)
    }

    #[must_use]
    pub fn base_iri(&self) -> &str {
        &self.base_iri
    }

    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    #[must_use]
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Number of entities added so far.
    #[must_use]
    pub fn entities(&self) -> usize {
        self.entities
    }

    /// Number of records or entries that were dropped.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
