//! Location confidence scores.

use pimrdf_rfc::location::Confidence;

pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// ## Summary
/// Scores a location-history confidence value in `[0, 1]`.
///
/// Labels go through [`confidence_score`] and percentages are divided by
/// 100. Anything else scores [`DEFAULT_CONFIDENCE`] and is logged.
#[must_use]
pub fn score_confidence(confidence: &Confidence) -> f64 {
    match confidence {
        Confidence::Label(label) => confidence_score(label),
        Confidence::Percent(percent) if (0.0..=100.0).contains(percent) => percent / 100.0,
        Confidence::Percent(_) | Confidence::Other(_) => {
            tracing::warn!(?confidence, "Unusable confidence value, using default");
            DEFAULT_CONFIDENCE
        }
    }
}

/// ## Summary
/// Maps a location-history confidence enumeration to a score in `[0, 1]`.
///
/// Unknown values score [`DEFAULT_CONFIDENCE`] and are logged.
#[must_use]
pub fn confidence_score(raw: &str) -> f64 {
    match raw.trim().to_ascii_uppercase().as_str() {
        "LOW_CONFIDENCE" => 0.25,
        "MEDIUM_CONFIDENCE" => 0.5,
        "HIGH_CONFIDENCE" => 0.9,
        _ => {
            tracing::warn!(confidence = %raw, "Unknown confidence value, using default");
            DEFAULT_CONFIDENCE
        }
    }
}
