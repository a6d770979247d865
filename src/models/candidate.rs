//! Geocoding candidates as returned by the OpenCage API.

use serde::{Deserialize, Serialize};

/// Top-level geocoder response body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeCandidate>,

    /// Present on both success and error responses
    #[serde(default)]
    pub status: Option<ProviderStatus>,
}

/// Provider status block: `{"code": 401, "message": "invalid API key"}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderStatus {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Geographic point in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub lat: f64,
    pub lng: f64,
}

/// Address components of a candidate.
///
/// Only the fields used for scoring, classification and display are kept;
/// the provider sends many more, which are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub road: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighbourhood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suburb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub town: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub village: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub municipality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

/// Returns the value if it is present and not blank.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Components {
    pub fn house_number(&self) -> Option<&str> {
        present(&self.house_number)
    }

    pub fn road(&self) -> Option<&str> {
        present(&self.road)
    }

    pub fn postcode(&self) -> Option<&str> {
        present(&self.postcode)
    }

    /// City-level name: city, town, village or municipality (in that order)
    pub fn city_name(&self) -> Option<&str> {
        present(&self.city)
            .or_else(|| present(&self.town))
            .or_else(|| present(&self.village))
            .or_else(|| present(&self.municipality))
    }

    /// Whether any settlement-level field is set (locality included)
    pub fn has_settlement(&self) -> bool {
        self.city_name().is_some() || present(&self.locality).is_some()
    }

    /// Sub-city area: neighbourhood, suburb or city district
    pub fn district_name(&self) -> Option<&str> {
        present(&self.neighbourhood)
            .or_else(|| present(&self.suburb))
            .or_else(|| present(&self.city_district))
    }

    /// County name, falling back to the state district
    pub fn county_name(&self) -> Option<&str> {
        present(&self.county).or_else(|| present(&self.state_district))
    }

    pub fn state(&self) -> Option<&str> {
        present(&self.state)
    }

    pub fn state_code(&self) -> Option<&str> {
        present(&self.state_code)
    }

    pub fn country_code(&self) -> Option<&str> {
        present(&self.country_code)
    }

    /// State code is "CA" or the state name mentions California
    pub fn is_california(&self) -> bool {
        self.state_code() == Some("CA")
            || self
                .state()
                .map(|s| s.to_lowercase().contains("california"))
                .unwrap_or(false)
    }

    pub fn is_united_states(&self) -> bool {
        self.country_code()
            .map(|c| c.eq_ignore_ascii_case("us"))
            .unwrap_or(false)
    }
}

/// One geocoder result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeocodeCandidate {
    /// Provider confidence, used as the base score
    #[serde(default)]
    pub confidence: Option<f64>,

    #[serde(default)]
    pub geometry: Option<Geometry>,

    #[serde(default)]
    pub components: Components,

    /// Provider display string
    #[serde(default)]
    pub formatted: Option<String>,
}

impl GeocodeCandidate {
    pub fn lat(&self) -> Option<f64> {
        self.geometry.map(|g| g.lat)
    }

    /// Label used when offering this candidate as an alternative
    pub fn label(&self) -> Option<String> {
        if let Some(formatted) = present(&self.formatted) {
            return Some(formatted.to_string());
        }
        self.geometry.map(|g| format!("{}, {}", g.lat, g.lng))
    }
}
