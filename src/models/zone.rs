//! Zone labels and classification provenance.

use serde::{Deserialize, Serialize};

/// Named California zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    North,
    Central,
    South,
    /// Only produced by the city-list policy
    Coastal,
    Unknown,
}

impl Zone {
    /// Display label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            Zone::North => "Zona Norte",
            Zone::Central => "Zona Central",
            Zone::South => "Zona Sur",
            Zone::Coastal => "Zona Costera",
            Zone::Unknown => "Zona desconocida",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How a zone was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneSource {
    /// County override table hit
    CountyOverride,
    /// Latitude bands of the county/latitude policy
    LatitudeBand,
    /// City list hit
    CityList,
    /// Latitude fallback of the city-list policy
    LatitudeFallback,
    /// No usable latitude
    Unresolved,
}

/// Result of classifying a coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub zone: Zone,
    pub source: ZoneSource,
}

impl Classification {
    pub fn new(zone: Zone, source: ZoneSource) -> Self {
        Self { zone, source }
    }

    pub fn unknown() -> Self {
        Self::new(Zone::Unknown, ZoneSource::Unresolved)
    }

    /// Display label; latitude-fallback results are tagged so their provenance is visible.
    pub fn label(&self) -> String {
        match self.source {
            ZoneSource::LatitudeFallback => format!("{} (por latitud)", self.zone.label()),
            _ => self.zone.label().to_string(),
        }
    }
}
