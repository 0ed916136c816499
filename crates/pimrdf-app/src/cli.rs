use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

#[derive(Parser)]
#[command(about, version, name = "pimrdf")]
/// Convert personal information exports into RDF and back
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Ingest a Google Takeout archive into Turtle files
    Takeout {
        /// Path to the Takeout ZIP archive
        #[arg(value_hint = ValueHint::FilePath)]
        archive: PathBuf,
        /// Directory the Turtle files are written to
        ///
        /// Defaults to `ingest.output_dir` from the configuration.
        #[arg(short, long, value_hint = ValueHint::DirPath)]
        output_dir: Option<PathBuf>,
        /// Show what would be processed without writing anything
        #[arg(short = 'n', long)]
        dry_run: bool,
    },
    /// Convert a vCard file into Turtle
    ImportVcf {
        /// vCard (.vcf) file to read
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// Turtle file to write
        #[arg(default_value = "imported-contacts.ttl", value_hint = ValueHint::FilePath)]
        output: PathBuf,
    },
    /// Export events from a Turtle file as an iCalendar document
    Ics {
        /// Turtle (.ttl) file containing events
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// ICS file to write
        ///
        /// If no file is given, stdout is written.
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
        /// Namespace of the event terms and subjects
        ///
        /// Defaults to `ingest.base_iri` from the configuration.
        #[arg(long, value_hint = ValueHint::Url)]
        base_namespace: Option<String>,
    },
}
