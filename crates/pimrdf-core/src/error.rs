use thiserror::Error;

/// Core-level errors
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid IRI {iri}: {reason}")]
    InvalidIri { iri: String, reason: String },
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
