//! Structured-text records (vCard / iCalendar subset).
//!
//! ## Usage
//!
//! ```rust
//! use pimrdf_rfc::record::{PermissiveParser, RecordParser};
//!
//! let input = "\
//! BEGIN:VCARD\r\n\
//! FN:John Doe\r\n\
//! EMAIL;TYPE=WORK:john@example.com\r\n\
//! END:VCARD\r\n";
//!
//! let parser = PermissiveParser::vcard();
//! let records: Vec<_> = parser.records(input).collect();
//! assert_eq!(records[0].first("EMAIL"), Some("john@example.com"));
//! ```
//!
//! Callers depend on [`RecordParser`] rather than the concrete parser so a
//! conformant implementation can replace [`PermissiveParser`].

mod model;
mod parse;

pub use model::{Property, Record};
pub use parse::{PermissiveParser, RecordParser, Records, parse_property};
