//! Query normalization: make sure every lookup is qualified with the region.

use regex::Regex;
use std::sync::LazyLock;

static CALIFORNIA_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bcalifornia\b|\bca\b").unwrap());

static USA_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:usa|united states|estados unidos)\b").unwrap());

/// Append the missing "California" / "USA" qualifiers to a raw address.
///
/// Whitespace-only input comes back empty; callers treat that as "no address".
pub fn normalize_address(raw: &str) -> String {
    let value = raw.trim();
    if value.is_empty() {
        return String::new();
    }

    let has_ca = CALIFORNIA_MARKER.is_match(value);
    let has_us = USA_MARKER.is_match(value);

    match (has_ca, has_us) {
        (true, true) => value.to_string(),
        (true, false) => format!("{}, USA", value),
        (false, true) => format!("{}, California", value),
        (false, false) => format!("{}, California, USA", value),
    }
}
