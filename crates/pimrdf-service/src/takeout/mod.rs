//! Google Takeout ingestion.
//!
//! An archive is extracted into a scratch directory, its data files are
//! converted category by category, and the resulting graphs are written as
//! Turtle only once every category has been converted. The scratch
//! directory is owned by an RAII handle and removed however the run ends.

pub mod archive;

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use oxrdf::Graph;
use pimrdf_core::config::IngestConfig;
use pimrdf_rfc::location::parse_location_history;
use pimrdf_rfc::record::PermissiveParser;

pub use archive::{DataCategory, DataFiles, ExtractedArchive, TakeoutArchive};

use crate::convert::ConversionRun;
use crate::emit::Provenance;
use crate::error::{ServiceError, ServiceResult};
use crate::output::write_turtle;

/// One Turtle file produced by an ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub category: DataCategory,
    pub path: PathBuf,
    pub entities: usize,
    pub skipped: usize,
    pub triples: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub outputs: Vec<OutputFile>,
}

/// Settings for converting Takeout archives.
#[derive(Debug, Clone)]
pub struct TakeoutIngestion {
    base_iri: String,
    output_dir: PathBuf,
    scratch_dir: Option<PathBuf>,
    location_limit: Option<usize>,
    created: DateTime<Utc>,
}

impl TakeoutIngestion {
    #[must_use]
    pub fn new(base_iri: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_iri: base_iri.into(),
            output_dir: output_dir.into(),
            scratch_dir: None,
            location_limit: None,
            created: Utc::now(),
        }
    }

    #[must_use]
    pub fn from_config(config: &IngestConfig) -> Self {
        Self {
            scratch_dir: config.scratch_dir.clone(),
            location_limit: config.location_limit,
            ..Self::new(config.base_iri.clone(), config.output_dir.clone())
        }
    }

    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    #[must_use]
    pub fn with_scratch_dir(mut self, scratch_dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(scratch_dir.into());
        self
    }

    #[must_use]
    pub fn with_location_limit(mut self, limit: Option<usize>) -> Self {
        self.location_limit = limit;
        self
    }

    /// Overrides the `dcterms:created` timestamp shared by the run.
    #[must_use]
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    /// ## Summary
    /// Extracts and classifies the archive's data files without converting
    /// anything. Returned paths are relative to the archive root.
    ///
    /// ## Errors
    /// Returns extraction or directory-listing errors.
    pub fn survey(&self, archive: &TakeoutArchive) -> ServiceResult<DataFiles> {
        let extracted = archive.extract(self.scratch_dir.as_deref())?;
        let root = extracted.path().to_path_buf();
        let mut files = extracted.discover()?;

        for category in DataCategory::ALL {
            let relative = files
                .get(category)
                .iter()
                .map(|p| p.strip_prefix(&root).unwrap_or(p).to_path_buf())
                .collect();
            match category {
                DataCategory::Contacts => files.contacts = relative,
                DataCategory::Calendar => files.calendar = relative,
                DataCategory::Location => files.location = relative,
            }
        }

        tracing::info!(
            archive = %archive.path().display(),
            contacts = files.contacts.len(),
            calendar = files.calendar.len(),
            location = files.location.len(),
            "Surveyed archive"
        );
        Ok(files)
    }

    /// ## Summary
    /// Converts every recognised data file in the archive and writes one
    /// Turtle file per category that had input files.
    ///
    /// ## Side Effects
    /// - Creates and removes a scratch directory
    /// - Creates the output directory and writes Turtle files into it
    ///
    /// ## Errors
    /// Returns an error if the archive cannot be extracted, a data file
    /// cannot be read, or an output file cannot be written. Nothing is
    /// written unless every category converted successfully.
    #[tracing::instrument(skip(self, archive), fields(archive = %archive.path().display()))]
    pub fn ingest(&self, archive: &TakeoutArchive) -> ServiceResult<IngestReport> {
        tracing::info!("Starting Takeout ingestion");

        let extracted = archive.extract(self.scratch_dir.as_deref())?;
        let files = extracted.discover()?;
        tracing::info!(
            contacts = files.contacts.len(),
            calendar = files.calendar.len(),
            location = files.location.len(),
            "Found data files"
        );

        let mut converted: Vec<(DataCategory, ConversionRun)> = Vec::new();
        for category in DataCategory::ALL {
            let paths = files.get(category);
            if paths.is_empty() {
                continue;
            }
            converted.push((category, self.convert_category(category, paths)?));
        }

        if let Err(e) = extracted.close() {
            tracing::warn!(error = %e, "Failed to remove scratch directory");
        }

        let mut report = IngestReport::default();
        for (category, run) in converted {
            let path = self.output_dir.join(category.file_name());
            let entities = run.entities();
            let skipped = run.skipped();
            let graph: Graph = run.into_graph();
            write_turtle(&path, &graph, &self.base_iri)?;
            report.outputs.push(OutputFile {
                category,
                path,
                entities,
                skipped,
                triples: graph.len(),
            });
        }

        tracing::info!(files = report.outputs.len(), "Ingestion complete");
        Ok(report)
    }

    fn convert_category(
        &self,
        category: DataCategory,
        paths: &[PathBuf],
    ) -> ServiceResult<ConversionRun> {
        let provenance = Provenance::new(category.source(), self.created);
        let mut run = ConversionRun::new(&self.base_iri, category.prefix(), Some(provenance))?;

        for path in paths {
            let content = fs::read_to_string(path).map_err(|source| ServiceError::ReadFile {
                path: path.clone(),
                source,
            })?;

            let added = match category {
                DataCategory::Contacts => run.add_records(&PermissiveParser::vcard(), &content)?,
                DataCategory::Calendar => run.add_records(&PermissiveParser::vevent(), &content)?,
                DataCategory::Location => match parse_location_history(&content) {
                    Ok(history) => run.add_locations(&history, self.location_limit)?,
                    Err(e) => {
                        tracing::warn!(
                            file = %path.display(),
                            error = %e,
                            "Skipping undecodable location file"
                        );
                        0
                    }
                },
            };
            tracing::debug!(%category, file = %path.display(), added, "Converted data file");
        }

        tracing::info!(
            %category,
            entities = run.entities(),
            skipped = run.skipped(),
            triples = run.graph().len(),
            "Converted category"
        );
        Ok(run)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::archive::tests::write_zip;
    use super::*;

    const CONTACTS: &[u8] = b"BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Test User\r\nEMAIL:test@example.com\r\nEND:VCARD\r\n";
    const CALENDAR: &[u8] = b"BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nSUMMARY:Test Event\r\nDTSTART:20250915T100000Z\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
    const LOCATIONS: &[u8] = br#"{"locations": [{"timestampMs": "1640995200000", "latitudeE7": 514874900, "longitudeE7": -114161}]}"#;

    struct Fixture {
        work: tempfile::TempDir,
        archive: TakeoutArchive,
    }

    impl Fixture {
        fn new(entries: &[(&str, &[u8])]) -> Self {
            let work = tempfile::tempdir().unwrap();
            let zip_path = work.path().join("takeout.zip");
            write_zip(&zip_path, entries);
            let archive = TakeoutArchive::open(&zip_path).unwrap();
            Self { work, archive }
        }

        fn scratch(&self) -> PathBuf {
            self.work.path().join("scratch")
        }

        fn output(&self) -> PathBuf {
            self.work.path().join("out")
        }

        fn ingestion(&self) -> TakeoutIngestion {
            TakeoutIngestion::new(pimrdf_core::vocab::DEFAULT_BASE_IRI, self.output())
                .with_scratch_dir(self.scratch())
                .with_created(Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap())
        }

        fn scratch_is_empty(&self) -> bool {
            fs::read_dir(self.scratch()).unwrap().next().is_none()
        }
    }

    #[test_log::test]
    fn full_archive_produces_three_files() {
        let fixture = Fixture::new(&[
            ("Takeout/Contacts/All Contacts.vcf", CONTACTS),
            ("Takeout/Calendar/Personal.ics", CALENDAR),
            ("Takeout/Location History/Records.json", LOCATIONS),
        ]);

        let report = fixture.ingestion().ingest(&fixture.archive).unwrap();
        assert_eq!(report.outputs.len(), 3);
        assert!(fixture.scratch_is_empty());

        let contacts = fs::read_to_string(fixture.output().join("contacts-takeout.ttl")).unwrap();
        assert!(contacts.contains(":contact-takeout-test-user"));
        assert!(contacts.contains("foaf:Person"));
        assert!(contacts.contains("<mailto:test@example.com>"));
        assert!(contacts.contains("\"Google Takeout - Contacts\""));

        let events = fs::read_to_string(fixture.output().join("events-takeout.ttl")).unwrap();
        assert!(events.contains(":event-takeout-test-event"));
        assert!(events.contains("\"2025-09-15T10:00:00Z\"^^"));

        let places = fs::read_to_string(fixture.output().join("locations-takeout.ttl")).unwrap();
        assert!(places.contains(":place-takeout-001"));
        assert!(places.contains("51.48749"));
        assert!(places.contains("\"2022-01-01T00:00:00Z\"^^"));
        assert!(places.contains("\"Google Takeout - Location History\""));
    }

    #[test]
    fn only_present_categories_are_written() {
        let fixture = Fixture::new(&[("Takeout/Contacts/All.vcf", CONTACTS)]);

        let report = fixture.ingestion().ingest(&fixture.archive).unwrap();
        assert_eq!(report.outputs.len(), 1);
        assert_eq!(report.outputs[0].category, DataCategory::Contacts);
        assert_eq!(report.outputs[0].entities, 1);
        assert!(fixture.output().join("contacts-takeout.ttl").exists());
        assert!(!fixture.output().join("events-takeout.ttl").exists());
    }

    #[test_log::test]
    fn unreadable_file_aborts_without_output_or_leftovers() {
        let fixture = Fixture::new(&[
            ("Takeout/Contacts/All.vcf", CONTACTS),
            ("Takeout/Calendar/broken.ics", b"BEGIN:VEVENT\n\xff\xfe\nEND:VEVENT\n"),
        ]);

        let err = fixture.ingestion().ingest(&fixture.archive).unwrap_err();
        assert!(matches!(err, ServiceError::ReadFile { .. }));
        assert!(fixture.scratch_is_empty());
        assert!(!fixture.output().exists());
    }

    #[test_log::test]
    fn undecodable_location_file_is_skipped() {
        let fixture = Fixture::new(&[
            ("Takeout/Location History/broken.json", b"{ nope"),
            ("Takeout/Location History/Records.json", LOCATIONS),
        ]);

        let report = fixture.ingestion().ingest(&fixture.archive).unwrap();
        assert_eq!(report.outputs.len(), 1);
        assert_eq!(report.outputs[0].entities, 1);
    }

    #[test]
    fn location_limit_applies_per_file() {
        let many = br#"[{"latitudeE7": 1, "longitudeE7": 1}, {"latitudeE7": 2, "longitudeE7": 2}, {"latitudeE7": 3, "longitudeE7": 3}]"#;
        let fixture = Fixture::new(&[
            ("Takeout/Location History/a.json", many),
            ("Takeout/Location History/b.json", many),
        ]);

        let report = fixture
            .ingestion()
            .with_location_limit(Some(2))
            .ingest(&fixture.archive)
            .unwrap();
        assert_eq!(report.outputs[0].entities, 4);
    }

    #[test]
    fn survey_of_unrelated_archive_is_empty() {
        let fixture = Fixture::new(&[("Takeout/Drive/notes.txt", b"hello")]);
        let files = fixture.ingestion().survey(&fixture.archive).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn timeline_visits_keep_places_and_confidence() {
        let timeline = br#"{"timelineObjects": [{"placeVisit": {"location": {"latitudeE7": 514874900, "longitudeE7": -114161, "name": "Cafe", "locationConfidence": 93.5}, "placeConfidence": "HIGH_CONFIDENCE"}}]}"#;
        let fixture = Fixture::new(&[(
            "Takeout/Location History/Semantic Location History/2022/2022_JANUARY.json",
            timeline,
        )]);

        let report = fixture.ingestion().ingest(&fixture.archive).unwrap();
        assert_eq!(report.outputs[0].entities, 1);

        let places = fs::read_to_string(fixture.output().join("locations-takeout.ttl")).unwrap();
        assert!(places.contains(":place-takeout-cafe"));
        assert!(places.contains("0.9"));
    }

    #[test]
    fn survey_reports_relative_paths() {
        let fixture = Fixture::new(&[
            ("Takeout/Contacts/All.vcf", CONTACTS),
            ("Takeout/Calendar/Personal.ics", CALENDAR),
        ]);

        let files = fixture.ingestion().survey(&fixture.archive).unwrap();
        assert_eq!(files.contacts, vec![PathBuf::from("Takeout/Contacts/All.vcf")]);
        assert_eq!(files.calendar.len(), 1);
        assert!(files.location.is_empty());
        assert!(!files.is_empty());
        assert!(fixture.scratch_is_empty());
        assert!(!fixture.output().exists());
    }
}
