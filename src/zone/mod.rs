//! Zone classification.
//!
//! Two policies classify a resolved coordinate into a [`Zone`]:
//!
//! - [`LatitudeBandPolicy`] (default): county overrides, then latitude bands.
//! - [`CityListPolicy`]: static city lists, then a latitude fallback.
//!
//! The policies use different thresholds and disagree on some cities
//! (Bakersfield is Central under the county override, South in the city
//! lists). Both are kept so they can be compared; neither is adjusted to
//! match the other.

mod city_list;
mod latitude_band;

pub use city_list::{overlapping_cities, CityListPolicy};
pub use latitude_band::{normalize_county, LatitudeBandPolicy};

use serde::{Deserialize, Serialize};

use crate::models::{Classification, Components};

/// Maps a resolved coordinate (and its address components) to a zone
pub trait ZoneClassifier: Send + Sync {
    fn classify(&self, components: &Components, lat: Option<f64>) -> Classification;
}

/// Selectable classification policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZonePolicy {
    #[default]
    LatitudeBand,
    CityList,
}

impl ZonePolicy {
    pub fn classifier(&self) -> Box<dyn ZoneClassifier> {
        match self {
            ZonePolicy::LatitudeBand => Box::new(LatitudeBandPolicy::default()),
            ZonePolicy::CityList => Box::new(CityListPolicy::default()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ZonePolicy::LatitudeBand => "latitude_band",
            ZonePolicy::CityList => "city_list",
        }
    }
}

impl std::str::FromStr for ZonePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "latitude_band" | "county" | "a" => Ok(ZonePolicy::LatitudeBand),
            "city_list" | "city" | "b" => Ok(ZonePolicy::CityList),
            other => Err(format!("unknown zone policy: {}", other)),
        }
    }
}

/// Usable latitude, if any
fn finite(lat: Option<f64>) -> Option<f64> {
    lat.filter(|l| l.is_finite())
}
