//! Single-shot forward geocoding against the OpenCage API.

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use super::GeocodeError;
use crate::config::GeocoderConfig;
use crate::models::{GeocodeCandidate, GeocodeResponse};

const GEOCODE_PATH: &str = "/geocode/v1/json";
/// Restricts matches to California
const REGION_COMPONENTS: &str = "country:US|state:CA";
const COUNTRY_CODE: &str = "us";

/// Copy of a request URL with the `key` parameter masked, for logging.
fn redact_key(url: &Url) -> Url {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { "REDACTED".into() } else { v };
            (k.into_owned(), v.into_owned())
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted
}

/// OpenCage client. One request per search, no retries.
#[derive(Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    language: String,
    limit: u8,
}

impl GeocodeClient {
    pub fn new(config: &GeocoderConfig) -> Result<Self, GeocodeError> {
        let mut builder = Client::builder().user_agent(concat!("cazone/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key().map(String::from),
            language: config.language.clone(),
            limit: config.limit,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Build the request URL for a normalized address.
    pub fn request_url(&self, address: &str) -> Result<Url, GeocodeError> {
        let key = self.api_key.as_deref().ok_or_else(|| {
            GeocodeError::Config(
                "no OpenCage API key configured; set OPENCAGE_API_KEY or geocoder.api_key"
                    .to_string(),
            )
        })?;

        let limit = self.limit.to_string();
        Url::parse_with_params(
            &format!("{}{}", self.base_url, GEOCODE_PATH),
            &[
                ("q", address),
                ("key", key),
                ("language", self.language.as_str()),
                ("limit", limit.as_str()),
                ("no_annotations", "1"),
                ("countrycode", COUNTRY_CODE),
                ("components", REGION_COMPONENTS),
            ],
        )
        .map_err(|e| GeocodeError::Config(format!("invalid geocoder URL {}: {}", self.base_url, e)))
    }

    /// Geocode a normalized address.
    ///
    /// Zero matches is `Ok(vec![])`, not an error.
    pub async fn search(&self, address: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        let url = self.request_url(address)?;
        debug!("Geocoding {:?} via {}", address, redact_key(&url));

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeocodeResponse>(&body)
                .ok()
                .and_then(|r| r.status)
                .and_then(|s| s.message);
            warn!("Geocoder returned {}: {:?}", status, message);
            return Err(GeocodeError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let data: GeocodeResponse = response.json().await?;
        info!("Geocoder returned {} result(s) for {:?}", data.results.len(), address);
        Ok(data.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(key: Option<&str>) -> GeocoderConfig {
        GeocoderConfig {
            base_url: "https://api.opencagedata.com/".to_string(),
            api_key: key.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_request_url_parameters() {
        let client = GeocodeClient::new(&config(Some("k3y"))).unwrap();
        let url = client.request_url("Fresno, California, USA").unwrap();

        assert_eq!(url.path(), "/geocode/v1/json");
        let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        let get = |name: &str| {
            params
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("q"), Some("Fresno, California, USA"));
        assert_eq!(get("key"), Some("k3y"));
        assert_eq!(get("language"), Some("es"));
        assert_eq!(get("limit"), Some("5"));
        assert_eq!(get("no_annotations"), Some("1"));
        assert_eq!(get("countrycode"), Some("us"));
        assert_eq!(get("components"), Some("country:US|state:CA"));
    }

    #[test]
    fn test_query_is_url_encoded() {
        let client = GeocodeClient::new(&config(Some("k3y"))).unwrap();
        let url = client.request_url("1 Main St & 2nd, CA, USA").unwrap();
        assert!(!url.as_str().contains(" & "));
    }

    #[test]
    fn test_redact_key_masks_only_the_key() {
        let client = GeocodeClient::new(&config(Some("k3y"))).unwrap();
        let url = client.request_url("Fresno, California, USA").unwrap();
        let redacted = redact_key(&url).to_string();

        assert!(!redacted.contains("k3y"));
        assert!(redacted.contains("key=REDACTED"));
        assert!(redacted.contains("q=Fresno%2C+California%2C+USA"));
        assert!(url.as_str().contains("key=k3y"));
    }

    #[tokio::test]
    async fn test_missing_key_is_config_error() {
        let client = GeocodeClient::new(&config(None)).unwrap();
        assert!(!client.has_api_key());

        let err = client.search("Fresno, California, USA").await.unwrap_err();
        assert!(matches!(err, GeocodeError::Config(_)));
    }
}
