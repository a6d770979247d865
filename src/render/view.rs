//! Presentation-independent result of one lookup.

use serde::Serialize;

use super::map::MapEmbed;
use crate::geocode::GeocodeError;
use crate::models::{Classification, Components, GeocodeCandidate};

/// Alternatives offered when the provider returned several matches
pub const MAX_ALTERNATIVES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStatus {
    /// Nothing to look up
    EmptyInput,
    /// Provider returned no usable match
    NotFound,
    Found,
    ConfigError,
    HttpError,
    RequestError,
}

impl LookupStatus {
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            LookupStatus::ConfigError | LookupStatus::HttpError | LookupStatus::RequestError
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// "lat, lng" with a fixed number of decimals
    pub fn display(&self, precision: usize) -> String {
        format!("{:.*}, {:.*}", precision, self.lat, precision, self.lng)
    }
}

/// Everything a renderer needs; no rendering logic lives here.
#[derive(Debug, Clone, Serialize)]
pub struct LookupView {
    pub status: LookupStatus,
    /// Normalized query that was sent to the geocoder
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<Classification>,
    /// Display label of `zone`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<MapEmbed>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
    /// Guidance or error text for non-found states
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LookupView {
    fn bare(status: LookupStatus, query: &str, message: Option<String>) -> Self {
        Self {
            status,
            query: query.to_string(),
            address: None,
            coordinates: None,
            zone: None,
            zone_label: None,
            map: None,
            alternatives: Vec::new(),
            message,
        }
    }

    pub fn empty_input() -> Self {
        Self::bare(
            LookupStatus::EmptyInput,
            "",
            Some("Por favor ingresa una dirección.".to_string()),
        )
    }

    pub fn not_found(query: &str) -> Self {
        Self::bare(
            LookupStatus::NotFound,
            query,
            Some(format!(
                "No encontramos resultados para: {}. Prueba agregando número de casa, código postal o una intersección.",
                query
            )),
        )
    }

    pub fn from_error(query: &str, err: &GeocodeError) -> Self {
        let (status, message) = match err {
            GeocodeError::Config(detail) => (
                LookupStatus::ConfigError,
                format!(
                    "Falta tu API key de OpenCage ({}). Define OPENCAGE_API_KEY o usa un backend/proxy.",
                    detail
                ),
            ),
            GeocodeError::Http { .. } => (LookupStatus::HttpError, err.to_string()),
            GeocodeError::Request(detail) => (LookupStatus::RequestError, detail.clone()),
        };
        Self::bare(status, query, Some(message))
    }

    /// View for the chosen candidate. `results` is the full provider list, used for alternatives.
    pub fn found(
        query: &str,
        best: &GeocodeCandidate,
        zone: Classification,
        results: &[GeocodeCandidate],
        map_span: f64,
    ) -> Self {
        let coordinates = best.geometry.map(|g| Coordinates {
            lat: g.lat,
            lng: g.lng,
        });

        Self {
            status: LookupStatus::Found,
            query: query.to_string(),
            address: Some(format_address(best)),
            coordinates,
            zone: Some(zone),
            zone_label: Some(zone.label()),
            map: coordinates.map(|c| MapEmbed::new(c.lat, c.lng, map_span)),
            alternatives: alternatives(results),
            message: None,
        }
    }
}

/// Human-readable address line of a candidate.
pub fn format_address(candidate: &GeocodeCandidate) -> String {
    let c: &Components = &candidate.components;

    let head = match (c.road(), c.house_number()) {
        (Some(road), Some(number)) => Some(format!("{} {}", road, number)),
        _ => candidate
            .formatted
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(String::from),
    };

    let state = if c.state_code() == Some("CA") {
        Some("CA")
    } else {
        c.state()
    };

    let parts: Vec<String> = [
        head,
        c.district_name().map(String::from),
        c.city_name().map(String::from),
        state.map(String::from),
        c.postcode().map(String::from),
    ]
    .into_iter()
    .flatten()
    .collect();

    parts.join(", ")
}

/// Labels of up to five results, only offered when there is more than one.
pub fn alternatives(results: &[GeocodeCandidate]) -> Vec<String> {
    if results.len() <= 1 {
        return Vec::new();
    }
    results
        .iter()
        .take(MAX_ALTERNATIVES)
        .filter_map(GeocodeCandidate::label)
        .collect()
}
