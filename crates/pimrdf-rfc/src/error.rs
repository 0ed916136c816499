use thiserror::Error;

/// Format parsing errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
