//! Shared building blocks for the PIM RDF toolkit: settings, error types,
//! the RDF vocabulary and small string utilities.

pub mod config;
pub mod error;
pub mod util;
pub mod vocab;
