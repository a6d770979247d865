use thiserror::Error;

/// Failure of a single geocoding request. None of these are retried.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeocodeError {
    /// No usable API key (or base URL) configured
    #[error("configuration error: {0}")]
    Config(String),

    /// Provider answered with a non-success status
    #[error("HTTP {status}{}", provider_suffix(.message))]
    Http {
        status: u16,
        message: Option<String>,
    },

    /// Network failure or unparseable response body
    #[error("{0}")]
    Request(String),
}

fn provider_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(" - {}", m))
        .unwrap_or_default()
}

impl From<reqwest::Error> for GeocodeError {
    /// The request URL carries the API key, so it is dropped from the message.
    fn from(err: reqwest::Error) -> Self {
        GeocodeError::Request(err.without_url().to_string())
    }
}
