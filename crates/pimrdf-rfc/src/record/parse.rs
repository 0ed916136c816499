//! Permissive line scanner for vCard / iCalendar blocks.
//!
//! This is deliberately *not* RFC 6350 / RFC 5545 conformant:
//! - folded continuation lines are not unfolded
//! - parameters are kept as raw strings and never interpreted
//! - values are not unescaped
//!
//! Malformed input never fails. Unterminated blocks, stray `END` lines and
//! lines without a colon are dropped.

use std::str::Lines;

use super::model::{Property, Record};

/// Source of [`Record`]s for one block type.
///
/// Implementations must be restartable: each call to [`records`] starts a
/// fresh scan with no state carried over from earlier calls.
///
/// [`records`]: RecordParser::records
pub trait RecordParser {
    type Records<'a>: Iterator<Item = Record>
    where
        Self: 'a;

    /// Lazily scans `input` for records.
    fn records<'a>(&'a self, input: &'a str) -> Self::Records<'a>;
}

/// Line-oriented parser collecting blocks of one type.
#[derive(Debug, Clone)]
pub struct PermissiveParser {
    kind: String,
}

impl PermissiveParser {
    /// Creates a parser that collects `BEGIN:<kind>` ... `END:<kind>` blocks.
    #[must_use]
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_ascii_uppercase(),
        }
    }

    /// Parser for `VCARD` blocks.
    #[must_use]
    pub fn vcard() -> Self {
        Self::new("VCARD")
    }

    /// Parser for `VEVENT` blocks.
    #[must_use]
    pub fn vevent() -> Self {
        Self::new("VEVENT")
    }
}

impl RecordParser for PermissiveParser {
    type Records<'a> = Records<'a>;

    fn records<'a>(&'a self, input: &'a str) -> Records<'a> {
        Records {
            kind: &self.kind,
            lines: input.lines(),
            line_num: 0,
            current: None,
            nested: 0,
        }
    }
}

/// Iterator over the records of one scan.
#[derive(Debug)]
pub struct Records<'a> {
    kind: &'a str,
    lines: Lines<'a>,
    line_num: usize,
    current: Option<Record>,
    /// Depth of foreign components open inside the current record.
    nested: usize,
}

impl Iterator for Records<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        while let Some(raw) = self.lines.next() {
            self.line_num += 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(kind) = delimiter(line, "BEGIN") {
                self.begin(kind);
                continue;
            }

            if let Some(kind) = delimiter(line, "END") {
                if let Some(record) = self.end(kind) {
                    return Some(record);
                }
                continue;
            }

            if self.nested > 0 {
                continue;
            }

            let Some(record) = self.current.as_mut() else {
                continue;
            };

            if let Some(property) = parse_property(line) {
                record.push(property);
            }
        }

        if let Some(record) = self.current.take() {
            tracing::warn!(
                kind = %self.kind,
                properties = record.len(),
                "Input ended inside a record, discarding it"
            );
        }

        None
    }
}

impl Records<'_> {
    fn begin(&mut self, kind: &str) {
        if kind.eq_ignore_ascii_case(self.kind) {
            if let Some(previous) = self.current.take() {
                tracing::debug!(
                    line = self.line_num,
                    properties = previous.len(),
                    "BEGIN inside an open record, discarding the open one"
                );
            }
            self.current = Some(Record::new(self.kind));
            self.nested = 0;
        } else if self.current.is_some() {
            self.nested += 1;
        }
    }

    fn end(&mut self, kind: &str) -> Option<Record> {
        if kind.eq_ignore_ascii_case(self.kind) {
            self.nested = 0;
            return self.current.take().filter(|record| !record.is_empty());
        }

        if self.nested > 0 {
            self.nested -= 1;
        }
        None
    }
}

/// Matches `BEGIN:<TYPE>` / `END:<TYPE>` and returns the type.
fn delimiter<'l>(line: &'l str, keyword: &str) -> Option<&'l str> {
    let (key, kind) = line.split_once(':')?;
    key.eq_ignore_ascii_case(keyword).then_some(kind.trim())
}

/// Splits a content line into its property.
///
/// Format: `[group.]name[;param]*:value`. Returns `None` when there is no
/// colon or the name is empty.
#[must_use]
pub fn parse_property(line: &str) -> Option<Property> {
    let (key_region, value) = line.split_once(':')?;

    let mut parts = key_region.split(';');
    let name = parts.next().unwrap_or_default();
    let params = parts.map(str::to_string).collect();

    let name = strip_group(name.trim());
    if name.is_empty() {
        return None;
    }

    Some(Property {
        name: name.to_ascii_uppercase(),
        params,
        value: value.to_string(),
    })
}

/// Removes a vCard group prefix (`item1.EMAIL` -> `EMAIL`).
fn strip_group(name: &str) -> &str {
    match name.split_once('.') {
        Some((group, rest))
            if !group.is_empty()
                && group.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') =>
        {
            rest
        }
        _ => name,
    }
}
