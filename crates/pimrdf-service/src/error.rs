use std::path::PathBuf;

use thiserror::Error;

/// Service layer errors. Every variant aborts the run.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Archive file not found: {}", .0.display())]
    ArchiveNotFound(PathBuf),

    #[error("Invalid ZIP file {}: {source}", path.display())]
    InvalidArchive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No events found in {}", .0.display())]
    NoEvents(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid IRI: {0}")]
    InvalidIri(#[from] oxrdf::IriParseError),

    #[error("Invalid RDF input: {0}")]
    RdfParse(#[from] oxrdfio::RdfParseError),

    #[error(transparent)]
    RfcError(#[from] pimrdf_rfc::error::RfcError),

    #[error(transparent)]
    CoreError(#[from] pimrdf_core::error::CoreError),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
