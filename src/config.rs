//! Runtime configuration: optional TOML file plus environment overrides.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::models::Zone;
use crate::zone::{CityListPolicy, LatitudeBandPolicy, ZoneClassifier, ZonePolicy};

/// Environment variable holding the OpenCage API key
pub const API_KEY_ENV: &str = "OPENCAGE_API_KEY";
/// Environment variable overriding the geocoder base URL (e.g. a key-holding proxy)
pub const BASE_URL_ENV: &str = "CAZONE_GEOCODER_URL";

/// Log filter used by the binaries when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Key shipped in sample configs; never valid
const PLACEHOLDER_KEY: &str = "YOUR_OPENCAGE_API_KEY";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub geocoder: GeocoderConfig,
    #[serde(default)]
    pub zones: ZonesConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub language: String,
    pub limit: u8,
    /// No timeout unless set
    pub timeout_secs: Option<u64>,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.opencagedata.com".to_string(),
            api_key: None,
            language: "es".to_string(),
            limit: 5,
            timeout_secs: None,
        }
    }
}

impl GeocoderConfig {
    /// Configured key, ignoring blanks and the sample placeholder
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != PLACEHOLDER_KEY)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ZonesConfig {
    pub policy: ZonePolicy,
    /// Extra county overrides for the latitude-band policy: `{ inyo = "central" }`
    pub county_overrides: HashMap<String, Zone>,
}

impl ZonesConfig {
    /// Build the classifier for the given policy with the configured overrides applied.
    pub fn classifier(&self, policy: ZonePolicy) -> Box<dyn ZoneClassifier> {
        match policy {
            ZonePolicy::LatitudeBand => {
                let mut classifier = LatitudeBandPolicy::default();
                for (county, zone) in &self.county_overrides {
                    classifier = classifier.with_override(county, *zone);
                }
                Box::new(classifier)
            }
            ZonePolicy::CityList => Box::new(CityListPolicy::default()),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RenderConfig {
    /// Decimal digits shown for coordinates
    pub coordinate_precision: usize,
    /// Half-size in degrees of the embedded map's bounding box
    pub map_span: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            coordinate_precision: 6,
            map_span: 0.01,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Load the optional config file, then apply `.env` and environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv::dotenv().ok();

        let mut config = match path {
            Some(path) => {
                info!("Loading config from {}", path.display());
                Self::load_from_file(path)?
            }
            None => Config::default(),
        };

        config.apply_env(|name| env::var(name).ok());
        Ok(config)
    }

    /// Apply environment overrides using the given lookup.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            debug!("Using API key from {}", API_KEY_ENV);
            self.geocoder.api_key = Some(key);
        }
        if let Some(url) = lookup(BASE_URL_ENV).filter(|u| !u.trim().is_empty()) {
            debug!("Using geocoder URL from {}: {}", BASE_URL_ENV, url);
            self.geocoder.base_url = url;
        }
    }
}
