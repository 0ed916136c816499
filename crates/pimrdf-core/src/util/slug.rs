//! Slug generation for entity identifiers.
//!
//! ## Summary
//! Derives a stable, IRI-safe token from a display name. Characters outside
//! ASCII alphanumerics and whitespace are dropped, whitespace runs become a
//! single hyphen and the result is lowercased.

/// Generate an IRI-safe slug from a display name.
///
/// Returns an empty string when nothing alphanumeric survives.
///
/// Examples:
/// - "Test User" -> "test-user"
/// - "John O'Neil" -> "john-oneil"
/// - "Email & Tasks" -> "email-tasks"
#[must_use]
pub fn generate_slug(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_ascii_lowercase()
}
