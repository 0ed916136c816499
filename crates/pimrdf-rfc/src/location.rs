//! Google location-history JSON.
//!
//! Three document shapes are recognised:
//! - `{ "locations": [ {...}, ... ] }` (Records.json)
//! - `{ "timelineObjects": [ { "placeVisit": { "location": {...} } }, ... ] }`
//! - a bare array of location objects
//!
//! Entries are decoded one by one so that a malformed entry is skipped
//! without losing the rest of the file.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{RfcError, RfcResult};

/// One location entry. Every field is optional in the source data.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationEntry {
    #[serde(rename = "latitudeE7")]
    pub latitude_e7: Option<i64>,
    #[serde(rename = "longitudeE7")]
    pub longitude_e7: Option<i64>,
    /// Epoch milliseconds; Takeout writes it as a string.
    pub timestamp_ms: Option<EpochMillis>,
    pub name: Option<String>,
    pub address: Option<String>,
    /// Visit-level confidence such as `HIGH_CONFIDENCE`. Timeline exports
    /// keep it on the `placeVisit`, next to `location`.
    #[serde(alias = "confidence")]
    pub place_confidence: Option<Confidence>,
    /// Per-location confidence, a percentage in timeline exports.
    pub location_confidence: Option<Confidence>,
}

impl LocationEntry {
    /// Visit-level confidence if present, otherwise the per-location one.
    #[must_use]
    pub fn confidence(&self) -> Option<&Confidence> {
        self.place_confidence
            .as_ref()
            .or(self.location_confidence.as_ref())
    }
}

/// A confidence value as found in location history.
///
/// Any JSON shape is accepted so that the field never rejects its entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Confidence {
    /// Enumeration such as `LOW_CONFIDENCE`.
    Label(String),
    /// Percentage in `0..=100`.
    Percent(f64),
    Other(Value),
}

/// Milliseconds since the Unix epoch, as a JSON number or string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EpochMillis {
    Number(i64),
    Text(String),
}

impl EpochMillis {
    /// ## Summary
    /// Returns the numeric value.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidTimestamp` if a string value is not an integer.
    pub fn value(&self) -> RfcResult<i64> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(s) => s
                .trim()
                .parse()
                .map_err(|_err| RfcError::InvalidTimestamp(s.clone())),
        }
    }
}

/// Decoded location-history file.
#[derive(Debug, Clone, Default)]
pub struct LocationHistory {
    pub entries: Vec<LocationEntry>,
    /// Number of entries that could not be decoded.
    pub skipped: usize,
}

/// ## Summary
/// Parses a location-history document.
///
/// Unknown document shapes yield an empty history.
///
/// ## Errors
/// Returns `RfcError::InvalidJson` if the input is not JSON at all.
pub fn parse_location_history(input: &str) -> RfcResult<LocationHistory> {
    let document: Value = serde_json::from_str(input)?;

    let raw_entries: Vec<Value> = match document {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            if let Some(Value::Array(items)) = map.remove("locations") {
                items
            } else if let Some(Value::Array(objects)) = map.remove("timelineObjects") {
                objects
                    .into_iter()
                    .filter_map(|mut object| {
                        object.get_mut("placeVisit").and_then(place_visit_entry)
                    })
                    .collect()
            } else {
                tracing::debug!("Location document has no known entry list");
                Vec::new()
            }
        }
        _ => Vec::new(),
    };

    let mut history = LocationHistory::default();
    for (index, raw) in raw_entries.into_iter().enumerate() {
        match serde_json::from_value::<LocationEntry>(raw) {
            Ok(entry) => history.entries.push(entry),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping undecodable location entry");
                history.skipped += 1;
            }
        }
    }

    Ok(history)
}

/// Takes the `location` of a `placeVisit`, carrying over the visit's
/// `placeConfidence`.
fn place_visit_entry(visit: &mut Value) -> Option<Value> {
    let mut location = visit.get_mut("location").map(Value::take)?;
    if let Some(fields) = location.as_object_mut()
        && !fields.contains_key("placeConfidence")
        && !fields.contains_key("confidence")
        && let Some(confidence) = visit.get("placeConfidence")
    {
        fields.insert("placeConfidence".to_owned(), confidence.clone());
    }
    Some(location)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_shape() {
        let input = r#"{
  "locations": [
    {
      "timestampMs": "1640995200000",
      "latitudeE7": 514874900,
      "longitudeE7": -114161,
      "name": "Test Place"
    }
  ]
}"#;
        let history = parse_location_history(input).unwrap();
        assert_eq!(history.entries.len(), 1);

        let entry = &history.entries[0];
        assert_eq!(entry.latitude_e7, Some(514_874_900));
        assert_eq!(entry.longitude_e7, Some(-114_161));
        assert_eq!(entry.name.as_deref(), Some("Test Place"));
        assert_eq!(
            entry.timestamp_ms.as_ref().unwrap().value().unwrap(),
            1_640_995_200_000
        );
    }

    #[test]
    fn timeline_shape() {
        let input = r#"{
  "timelineObjects": [
    {
      "placeVisit": {
        "location": {
          "latitudeE7": 514874900,
          "longitudeE7": -114161,
          "placeId": "ChIJ0Y0l7mIDdkgR",
          "address": "1 Main St",
          "name": "Cafe",
          "locationConfidence": 93.5
        },
        "duration": { "startTimestamp": "2022-01-01T09:00:00Z" },
        "placeConfidence": "HIGH_CONFIDENCE"
      }
    },
    { "activitySegment": { "distance": 100 } }
  ]
}"#;
        let history = parse_location_history(input).unwrap();
        assert_eq!(history.entries.len(), 1);
        assert_eq!(history.skipped, 0);

        let entry = &history.entries[0];
        assert_eq!(entry.latitude_e7, Some(514_874_900));
        assert_eq!(entry.name.as_deref(), Some("Cafe"));
        assert_eq!(entry.address.as_deref(), Some("1 Main St"));
        assert_eq!(entry.location_confidence, Some(Confidence::Percent(93.5)));
        assert_eq!(
            entry.confidence(),
            Some(&Confidence::Label("HIGH_CONFIDENCE".to_string()))
        );
    }

    #[test]
    fn numeric_location_confidence_keeps_entry() {
        let history = parse_location_history(
            r#"{"timelineObjects":[{"placeVisit":{"location":{"latitudeE7":1,"longitudeE7":2,"locationConfidence":40}}}]}"#,
        )
        .unwrap();
        assert_eq!(history.entries.len(), 1);
        assert_eq!(
            history.entries[0].confidence(),
            Some(&Confidence::Percent(40.0))
        );
    }

    #[test]
    fn unexpected_confidence_shape_keeps_entry() {
        let history =
            parse_location_history(r#"[{"latitudeE7": 1, "confidence": {"level": 3}}]"#).unwrap();
        assert_eq!(history.entries.len(), 1);
        assert!(matches!(
            history.entries[0].confidence(),
            Some(Confidence::Other(_))
        ));
    }

    #[test]
    fn bare_array_and_numeric_timestamp() {
        let history =
            parse_location_history(r#"[{"latitudeE7": 10, "timestampMs": 5}]"#).unwrap();
        assert_eq!(history.entries.len(), 1);
        assert_eq!(
            history.entries[0].timestamp_ms,
            Some(EpochMillis::Number(5))
        );
    }

    #[test_log::test]
    fn bad_entry_is_skipped() {
        let history = parse_location_history(
            r#"{"locations": [{"latitudeE7": "north"}, {"latitudeE7": 3}]}"#,
        )
        .unwrap();
        assert_eq!(history.entries.len(), 1);
        assert_eq!(history.skipped, 1);
    }

    #[test]
    fn unknown_shape_is_empty() {
        let history = parse_location_history(r#"{"semanticSegments": []}"#).unwrap();
        assert!(history.entries.is_empty());
        assert_eq!(history.skipped, 0);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            parse_location_history("{ not json"),
            Err(RfcError::InvalidJson(_))
        ));
    }

    #[test]
    fn text_timestamp_must_be_numeric() {
        assert!(EpochMillis::Text("soon".to_string()).value().is_err());
    }
}
