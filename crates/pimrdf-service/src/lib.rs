//! Conversion of structured-text exports into RDF graphs.
//!
//! The pipeline for one run is: parse records ([`pimrdf_rfc::record`]),
//! normalize fields ([`normalize`]), allocate identifiers ([`allocate`]),
//! emit triples ([`emit`]) into the run's graph ([`convert`]), and finally
//! write Turtle ([`output`]).
//!
//! [`takeout`], [`import`] and [`ics`] are the entry points used by the CLI.

pub mod allocate;
pub mod convert;
pub mod emit;
pub mod error;
pub mod ics;
pub mod import;
pub mod normalize;
pub mod output;
pub mod takeout;
