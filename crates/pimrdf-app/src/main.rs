mod cli;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use pimrdf_core::config::{Settings, load_config};
use pimrdf_service::ics::export_calendar;
use pimrdf_service::import::import_vcf;
use pimrdf_service::takeout::{TakeoutArchive, TakeoutIngestion};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

use crate::cli::{Args, Command};

fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    let args = Args::parse();
    let config = load_config()?;

    tracing::debug!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping info");
    }

    match args.command {
        Command::Takeout {
            archive,
            output_dir,
            dry_run,
        } => takeout(&config, &archive, output_dir, dry_run),
        Command::ImportVcf { input, output } => {
            let contacts = import_vcf(&input, &output, &config.ingest.base_iri)
                .with_context(|| format!("Failed to import {}", input.display()))?;
            if contacts > 0 {
                tracing::info!(contacts, output = %output.display(), "Import complete");
            }
            Ok(())
        }
        Command::Ics {
            input,
            output,
            base_namespace,
        } => {
            let base = base_namespace.unwrap_or_else(|| config.ingest.base_iri.clone());
            let calendar = export_calendar(&input, &base, Utc::now())
                .with_context(|| format!("Failed to export events from {}", input.display()))?;
            match output {
                Some(path) => {
                    fs::write(&path, calendar.as_bytes())
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!(output = %path.display(), "ICS calendar written");
                }
                None => {
                    let mut stdout = io::stdout().lock();
                    stdout.write_all(calendar.as_bytes())?;
                    stdout.flush()?;
                }
            }
            Ok(())
        }
    }
}

fn takeout(
    config: &Settings,
    archive: &Path,
    output_dir: Option<PathBuf>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let archive = TakeoutArchive::open(archive)?;
    let mut ingestion = TakeoutIngestion::from_config(&config.ingest);
    if let Some(dir) = output_dir {
        ingestion = ingestion.with_output_dir(dir);
    }

    if dry_run {
        let files = ingestion
            .survey(&archive)
            .with_context(|| format!("Failed to inspect {}", archive.path().display()))?;
        for (category, count) in files.counts() {
            tracing::info!(%category, files = count, "Would process");
            for path in files.get(category) {
                tracing::info!(%category, file = %path.display(), "Data file");
            }
        }
        return Ok(());
    }

    let report = ingestion
        .ingest(&archive)
        .with_context(|| format!("Failed to ingest {}", archive.path().display()))?;

    if report.outputs.is_empty() {
        tracing::warn!("Archive contained no contacts, calendars or location history");
    }
    for output in &report.outputs {
        tracing::info!(
            category = %output.category,
            path = %output.path.display(),
            entities = output.entities,
            skipped = output.skipped,
            triples = output.triples,
            "Generated"
        );
    }
    Ok(())
}
