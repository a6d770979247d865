//! County override + latitude band classification.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use super::{finite, ZoneClassifier};
use crate::models::{Classification, Components, Zone, ZoneSource};

/// Lat >= this is North
const NORTH_MIN: f64 = 37.9;
/// Lat >= this (and below NORTH_MIN) is Central; below is South
const CENTRAL_MIN: f64 = 34.7;

/// Counties whose zone does not follow the latitude bands
const DEFAULT_COUNTY_OVERRIDES: &[(&str, Zone)] = &[
    // Bakersfield sits south of the Central band but belongs to the Central valley
    ("kern", Zone::Central),
];

static COUNTY_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*county$").unwrap());

/// Lowercase a county name and drop a trailing "county".
pub fn normalize_county(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    COUNTY_SUFFIX.replace(&lower, "").trim().to_string()
}

/// Classifies by county override first, then by latitude band.
#[derive(Debug, Clone)]
pub struct LatitudeBandPolicy {
    /// Normalized county name -> forced zone
    overrides: HashMap<String, Zone>,
}

impl LatitudeBandPolicy {
    pub fn new() -> Self {
        let overrides = DEFAULT_COUNTY_OVERRIDES
            .iter()
            .map(|(county, zone)| (county.to_string(), *zone))
            .collect();
        Self { overrides }
    }

    /// Add or replace a county override. The name is normalized before insertion.
    pub fn with_override(mut self, county: &str, zone: Zone) -> Self {
        let key = normalize_county(county);
        if !key.is_empty() {
            self.overrides.insert(key, zone);
        }
        self
    }

    pub fn county_override(&self, county: &str) -> Option<Zone> {
        let key = normalize_county(county);
        if key.is_empty() {
            return None;
        }
        self.overrides.get(&key).copied()
    }

    /// Latitude bands alone, ignoring overrides
    pub fn zone_for_latitude(lat: Option<f64>) -> Zone {
        match finite(lat) {
            None => Zone::Unknown,
            Some(lat) if lat >= NORTH_MIN => Zone::North,
            Some(lat) if lat >= CENTRAL_MIN => Zone::Central,
            Some(_) => Zone::South,
        }
    }
}

impl Default for LatitudeBandPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl ZoneClassifier for LatitudeBandPolicy {
    fn classify(&self, components: &Components, lat: Option<f64>) -> Classification {
        if let Some(zone) = components
            .county_name()
            .and_then(|county| self.county_override(county))
        {
            return Classification::new(zone, ZoneSource::CountyOverride);
        }

        match Self::zone_for_latitude(lat) {
            Zone::Unknown => Classification::unknown(),
            zone => Classification::new(zone, ZoneSource::LatitudeBand),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(county: Option<&str>, lat: Option<f64>) -> Classification {
        let components = Components {
            county: county.map(String::from),
            ..Default::default()
        };
        LatitudeBandPolicy::default().classify(&components, lat)
    }

    #[test]
    fn test_latitude_bands() {
        assert_eq!(classify(None, Some(38.58)).zone, Zone::North); // Sacramento
        assert_eq!(classify(None, Some(37.9)).zone, Zone::North);
        assert_eq!(classify(None, Some(37.8999)).zone, Zone::Central);
        assert_eq!(classify(None, Some(34.7)).zone, Zone::Central);
        assert_eq!(classify(None, Some(34.6999)).zone, Zone::South);
        assert_eq!(classify(None, Some(32.67)).zone, Zone::South); // Calexico
    }

    #[test]
    fn test_fresno_latitude_is_central() {
        let result = classify(None, Some(36.7));
        assert_eq!(result.label(), "Zona Central");
        assert_eq!(result.source, ZoneSource::LatitudeBand);
    }

    #[test]
    fn test_missing_latitude_is_unknown() {
        assert_eq!(classify(None, None).zone, Zone::Unknown);
        assert_eq!(classify(None, Some(f64::NAN)).zone, Zone::Unknown);
    }

    #[test]
    fn test_county_override_beats_latitude() {
        let result = classify(Some("Kern"), Some(34.0));
        assert_eq!(result.zone, Zone::Central);
        assert_eq!(result.source, ZoneSource::CountyOverride);
    }

    #[test]
    fn test_county_override_without_latitude() {
        assert_eq!(classify(Some("Kern County"), None).zone, Zone::Central);
    }

    #[test]
    fn test_state_district_used_when_county_missing() {
        let components = Components {
            state_district: Some("KERN COUNTY".to_string()),
            ..Default::default()
        };
        let result = LatitudeBandPolicy::default().classify(&components, Some(33.0));
        assert_eq!(result.zone, Zone::Central);
    }

    #[test]
    fn test_unlisted_county_uses_latitude() {
        assert_eq!(classify(Some("Los Angeles County"), Some(34.05)).zone, Zone::South);
    }

    #[test]
    fn test_normalize_county() {
        assert_eq!(normalize_county("Kern County"), "kern");
        assert_eq!(normalize_county("  San Luis Obispo county "), "san luis obispo");
        assert_eq!(normalize_county("County"), "");
    }

    #[test]
    fn test_custom_override() {
        let policy = LatitudeBandPolicy::default().with_override("Inyo County", Zone::Central);
        let components = Components {
            county: Some("Inyo".to_string()),
            ..Default::default()
        };
        assert_eq!(policy.classify(&components, Some(36.0)).zone, Zone::Central);
        assert_eq!(policy.classify(&components, Some(38.0)).zone, Zone::Central);
    }
}
