use std::path::PathBuf;

use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};
use crate::vocab::{DEFAULT_BASE_IRI, validate_base_iri};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub ingest: IngestConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    /// Namespace that entity identifiers are appended to.
    pub base_iri: String,
    /// Directory that generated Turtle files are written to.
    pub output_dir: PathBuf,
    /// Parent directory for temporary archive extraction. Defaults to the
    /// system temp directory.
    pub scratch_dir: Option<PathBuf>,
    /// Maximum number of places read from each location-history file.
    pub location_limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional
    /// `config.toml` in the working directory into a `Settings`.
    ///
    /// Environment variables use the `PIMRDF_` prefix and `__` between
    /// section and key, e.g. `PIMRDF_INGEST__BASE_IRI`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Config::builder()
            .set_default("ingest.base_iri", DEFAULT_BASE_IRI)?
            .set_default("ingest.output_dir", "data")?
            .set_default("logging.level", "info")?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Env overrides file
            .add_source(
                config::Environment::with_prefix("PIMRDF")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Checks values that deserialize fine but cannot be used.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if the base IRI is unusable.
    pub fn validate(&self) -> CoreResult<()> {
        validate_base_iri(&self.ingest.base_iri)
            .map_err(|e| CoreError::ConfigError(format!("ingest.base_iri: {e}")))
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading, deserializing or validating the configuration fails.
pub fn load_config() -> Result<Settings> {
    if let Err(e) = dotenvy::dotenv() {
        tracing::trace!(error = %e, "No .env file loaded");
    }

    let settings = Settings::load()?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(base_iri: &str) -> Settings {
        Settings {
            ingest: IngestConfig {
                base_iri: base_iri.to_string(),
                output_dir: PathBuf::from("data"),
                scratch_dir: None,
                location_limit: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }

    #[test_log::test]
    fn test_defaults_load_without_sources() {
        tracing::debug!("Loading settings from defaults only");

        let loaded = Settings::load().unwrap();
        assert!(!loaded.ingest.base_iri.is_empty());
        assert!(!loaded.logging.level.is_empty());
    }

    #[test]
    fn test_validate_accepts_default_base() {
        assert!(settings(DEFAULT_BASE_IRI).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_base_without_separator() {
        let err = settings("https://example.org/pim").validate().unwrap_err();
        assert!(err.to_string().contains("ingest.base_iri"));
    }

    #[test]
    fn test_ingest_config_clone() {
        let config = settings(DEFAULT_BASE_IRI);
        let cloned = config.clone();
        assert_eq!(cloned.ingest.output_dir, config.ingest.output_dir);
        assert_eq!(cloned.ingest.location_limit, None);
    }
}
