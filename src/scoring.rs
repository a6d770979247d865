//! Candidate scoring and best-result selection.

use geo::{coord, Rect};
use tracing::debug;

use crate::models::GeocodeCandidate;

/// Rectangle used as a soft "inside the region" signal while scoring.
#[derive(Debug, Clone, Copy)]
pub struct RegionBounds {
    rect: Rect<f64>,
}

impl RegionBounds {
    pub fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        Self {
            rect: Rect::new(
                coord! { x: min_lng, y: min_lat },
                coord! { x: max_lng, y: max_lat },
            ),
        }
    }

    /// California's bounding rectangle
    pub fn california() -> Self {
        Self::new(32.4, 42.1, -124.6, -114.0)
    }

    /// Inclusive on every edge
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        let (min, max) = (self.rect.min(), self.rect.max());
        lat >= min.y && lat <= max.y && lng >= min.x && lng <= max.x
    }
}

impl Default for RegionBounds {
    fn default() -> Self {
        Self::california()
    }
}

const IN_REGION: f64 = 4.0;
const OUT_OF_REGION: f64 = -10.0;
const HOUSE_NUMBER: f64 = 6.0;
const ROAD: f64 = 3.0;
const POSTCODE: f64 = 2.0;
const STATE_MATCH: f64 = 3.0;
const COUNTRY_MATCH: f64 = 2.0;
const SETTLEMENT: f64 = 1.0;

/// Score a candidate. Candidates without geometry score `f64::NEG_INFINITY`.
pub fn score_candidate(candidate: &GeocodeCandidate, bounds: &RegionBounds) -> f64 {
    let Some(geometry) = candidate.geometry else {
        return f64::NEG_INFINITY;
    };
    let c = &candidate.components;

    let mut score = candidate.confidence.unwrap_or(0.0);

    score += if bounds.contains(geometry.lat, geometry.lng) {
        IN_REGION
    } else {
        OUT_OF_REGION
    };

    if c.house_number().is_some() {
        score += HOUSE_NUMBER;
    }
    if c.road().is_some() {
        score += ROAD;
    }
    if c.postcode().is_some() {
        score += POSTCODE;
    }
    if c.is_california() {
        score += STATE_MATCH;
    }
    if c.is_united_states() {
        score += COUNTRY_MATCH;
    }
    if c.has_settlement() {
        score += SETTLEMENT;
    }

    score
}

/// Pick the highest-scoring candidate. Ties go to the earliest candidate.
pub fn pick_best<'a>(
    candidates: &'a [GeocodeCandidate],
    bounds: &RegionBounds,
) -> Option<&'a GeocodeCandidate> {
    let mut best = None;
    let mut best_score = f64::NEG_INFINITY;

    for (idx, candidate) in candidates.iter().enumerate() {
        let score = score_candidate(candidate, bounds);
        debug!(
            "Candidate {} ({:?}) scored {}",
            idx,
            candidate.formatted.as_deref().unwrap_or("-"),
            score
        );
        if score > best_score {
            best_score = score;
            best = Some(candidate);
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Components, Geometry};

    fn candidate(lat: f64, lng: f64, components: Components) -> GeocodeCandidate {
        GeocodeCandidate {
            confidence: Some(5.0),
            geometry: Some(Geometry { lat, lng }),
            components,
            formatted: None,
        }
    }

    fn full_components() -> Components {
        Components {
            house_number: Some("2600".to_string()),
            road: Some("Fresno Street".to_string()),
            postcode: Some("93721".to_string()),
            city: Some("Fresno".to_string()),
            state: Some("California".to_string()),
            state_code: Some("CA".to_string()),
            country_code: Some("us".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_full_in_region_score() {
        let c = candidate(36.73, -119.78, full_components());
        // 5 + 4 + 6 + 3 + 2 + 3 + 2 + 1
        assert_eq!(score_candidate(&c, &RegionBounds::california()), 26.0);
    }

    #[test]
    fn test_out_of_region_sparse_score() {
        let c = candidate(40.71, -74.0, Components::default());
        assert_eq!(score_candidate(&c, &RegionBounds::california()), -5.0);
    }

    #[test]
    fn test_missing_geometry_is_minimum() {
        let c = GeocodeCandidate {
            confidence: Some(10.0),
            components: full_components(),
            ..Default::default()
        };
        assert_eq!(
            score_candidate(&c, &RegionBounds::california()),
            f64::NEG_INFINITY
        );
    }

    #[test]
    fn test_house_number_adds_exactly_six() {
        let bounds = RegionBounds::california();
        let without = candidate(
            34.05,
            -118.24,
            Components {
                road: Some("Spring St".to_string()),
                ..Default::default()
            },
        );
        let mut with = without.clone();
        with.components.house_number = Some("200".to_string());

        assert_eq!(
            score_candidate(&with, &bounds) - score_candidate(&without, &bounds),
            6.0
        );
    }

    #[test]
    fn test_state_name_match_is_case_insensitive() {
        let c = candidate(
            36.0,
            -120.0,
            Components {
                state: Some("CALIFORNIA".to_string()),
                country_code: Some("US".to_string()),
                ..Default::default()
            },
        );
        // 5 + 4 + 3 + 2
        assert_eq!(score_candidate(&c, &RegionBounds::california()), 14.0);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let bounds = RegionBounds::california();
        assert!(bounds.contains(32.4, -124.6));
        assert!(bounds.contains(42.1, -114.0));
        assert!(!bounds.contains(42.11, -120.0));
    }

    #[test]
    fn test_pick_best_empty() {
        assert!(pick_best(&[], &RegionBounds::california()).is_none());
    }

    #[test]
    fn test_pick_best_prefers_in_region() {
        let sparse = candidate(40.71, -74.0, Components::default());
        let full = candidate(36.73, -119.78, full_components());
        let candidates = vec![sparse, full];

        let best = pick_best(&candidates, &RegionBounds::california()).unwrap();
        assert_eq!(best.components.house_number.as_deref(), Some("2600"));
    }

    #[test]
    fn test_pick_best_first_wins_ties() {
        let mut first = candidate(36.73, -119.78, full_components());
        first.formatted = Some("first".to_string());
        let mut second = first.clone();
        second.formatted = Some("second".to_string());
        let candidates = vec![first, second];

        let best = pick_best(&candidates, &RegionBounds::california()).unwrap();
        assert_eq!(best.formatted.as_deref(), Some("first"));
    }

    #[test]
    fn test_pick_best_without_geometry_is_none() {
        let candidates = vec![GeocodeCandidate::default(), GeocodeCandidate::default()];
        assert!(pick_best(&candidates, &RegionBounds::california()).is_none());
    }
}
