//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use cazone::config::{Config, GeocoderConfig};
use serde_json::{json, Value};

pub const TEST_KEY: &str = "test-key";

pub fn config_for(base_url: &str) -> Config {
    Config {
        geocoder: GeocoderConfig {
            base_url: base_url.to_string(),
            api_key: Some(TEST_KEY.to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// OpenCage-shaped result
pub fn result(formatted: &str, lat: f64, lng: f64, components: Value) -> Value {
    json!({
        "confidence": 8,
        "formatted": formatted,
        "geometry": { "lat": lat, "lng": lng },
        "components": components,
    })
}

pub fn body(results: Vec<Value>) -> Value {
    let total = results.len();
    json!({
        "results": results,
        "status": { "code": 200, "message": "OK" },
        "total_results": total,
    })
}

pub fn bakersfield() -> Value {
    result(
        "1600 Truxtun Avenue, Bakersfield, CA 93301, Estados Unidos",
        35.3733,
        -119.0187,
        json!({
            "house_number": "1600",
            "road": "Truxtun Avenue",
            "city": "Bakersfield",
            "county": "Kern County",
            "state": "California",
            "state_code": "CA",
            "postcode": "93301",
            "country_code": "us"
        }),
    )
}
