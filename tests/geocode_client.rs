//! GeocodeClient against a mock OpenCage server.

mod helpers;

use cazone::{GeocodeClient, GeocodeError};
use helpers::{bakersfield, body, config_for, TEST_KEY};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const QUERY: &str = "1600 Truxtun Ave, Bakersfield, California, USA";

async fn client_for(server: &MockServer) -> GeocodeClient {
    GeocodeClient::new(&config_for(&server.uri()).geocoder).expect("client")
}

#[tokio::test]
async fn test_search_sends_region_constraints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geocode/v1/json"))
        .and(query_param("q", QUERY))
        .and(query_param("key", TEST_KEY))
        .and(query_param("language", "es"))
        .and(query_param("limit", "5"))
        .and(query_param("no_annotations", "1"))
        .and(query_param("countrycode", "us"))
        .and(query_param("components", "country:US|state:CA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(vec![bakersfield()])))
        .expect(1)
        .mount(&server)
        .await;

    let results = client_for(&server).await.search(QUERY).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].components.city_name(), Some("Bakersfield"));
    assert_eq!(results[0].lat(), Some(35.3733));
}

#[tokio::test]
async fn test_zero_results_is_empty_not_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geocode/v1/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(vec![])))
        .mount(&server)
        .await;

    let results = client_for(&server).await.search(QUERY).await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_http_error_carries_provider_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geocode/v1/json"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "results": [],
            "status": { "code": 401, "message": "invalid API key" }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).await.search(QUERY).await.unwrap_err();
    assert_eq!(
        err,
        GeocodeError::Http {
            status: 401,
            message: Some("invalid API key".to_string())
        }
    );
    assert_eq!(err.to_string(), "HTTP 401 - invalid API key");
}

#[tokio::test]
async fn test_http_error_with_unparseable_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server).await.search(QUERY).await.unwrap_err();
    assert_eq!(
        err,
        GeocodeError::Http {
            status: 503,
            message: None
        }
    );
}

#[tokio::test]
async fn test_malformed_body_is_request_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).await.search(QUERY).await.unwrap_err();
    let GeocodeError::Request(message) = err else {
        panic!("expected a request error, got {:?}", err);
    };
    assert!(!message.contains(TEST_KEY), "{}", message);
    assert!(!message.contains("key="), "{}", message);
}

#[tokio::test]
async fn test_connection_failure_is_request_error() {
    // Nothing listens on port 1
    let client = GeocodeClient::new(&config_for("http://127.0.0.1:1").geocoder).unwrap();
    let err = client.search(QUERY).await.unwrap_err();
    let GeocodeError::Request(message) = err else {
        panic!("expected a request error, got {:?}", err);
    };
    assert!(!message.contains(TEST_KEY), "{}", message);
    assert!(!message.contains("key="), "{}", message);
}

#[tokio::test]
async fn test_missing_key_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(vec![])))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = config_for(&server.uri());
    config.geocoder.api_key = None;
    let client = GeocodeClient::new(&config.geocoder).unwrap();

    let err = client.search(QUERY).await.unwrap_err();
    assert!(matches!(err, GeocodeError::Config(_)));
}
