//! Places from location-history entries.

use pimrdf_rfc::datetime::Timestamp;
use pimrdf_rfc::location::LocationEntry;

use super::confidence::score_confidence;
use super::non_empty;

const E7: f64 = 10_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Converts degrees scaled by 10^7, as stored by location history.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "E7 coordinates are at most 1.8e9, well inside f64's exact range"
    )]
    pub fn from_e7(latitude_e7: i64, longitude_e7: i64) -> Self {
        Self {
            latitude: latitude_e7 as f64 / E7,
            longitude: longitude_e7 as f64 / E7,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub coordinates: Option<Coordinates>,
    pub visited: Option<Timestamp>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub confidence: Option<f64>,
}

/// ## Summary
/// Builds a [`Place`] from a location-history entry.
///
/// Coordinates are set only when both latitude and longitude are present.
/// Returns `None` for entries with neither coordinates nor a name.
#[must_use]
pub fn normalize_place(entry: &LocationEntry) -> Option<Place> {
    let coordinates = match (entry.latitude_e7, entry.longitude_e7) {
        (Some(lat), Some(long)) => Some(Coordinates::from_e7(lat, long)),
        _ => None,
    };
    let name = non_empty(entry.name.as_deref());

    if coordinates.is_none() && name.is_none() {
        tracing::warn!("Skipping location without coordinates or name");
        return None;
    }

    let visited = entry.timestamp_ms.as_ref().and_then(|ms| {
        match ms.value().and_then(Timestamp::from_epoch_millis) {
            Ok(ts) => Some(ts),
            Err(e) => {
                tracing::warn!(error = %e, "Dropping unusable location timestamp");
                None
            }
        }
    });

    Some(Place {
        coordinates,
        visited,
        name,
        address: non_empty(entry.address.as_deref()),
        confidence: entry.confidence().map(score_confidence),
    })
}
