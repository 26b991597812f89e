//! Provider wire types and error definitions.

use serde::Deserialize;
use thiserror::Error;

use crate::monitor::StatusSample;

/// Errors that can occur while fetching a status.
///
/// Every variant is transient: the poll loop logs it and retries.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Connection could not be established.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// Provider returned a non-success status code.
    #[error("Provider returned status {0}")]
    Status(u16),

    /// Response body was not JSON.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Result type for provider operations.
pub type FetchResult<T> = Result<T, FetchError>;

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Connection(err.to_string())
        } else {
            FetchError::Http(err.to_string())
        }
    }
}

/// Top-level body of `GET /v1/flights`.
#[derive(Debug, Deserialize)]
pub struct FlightsResponse {
    #[serde(default)]
    pub data: Option<Vec<FlightRecord>>,

    /// Present instead of `data` when the request was rejected.
    #[serde(default)]
    pub error: Option<ApiError>,
}

/// One flight in the `data` array.
#[derive(Debug, Deserialize)]
pub struct FlightRecord {
    #[serde(default)]
    pub flight_status: Option<String>,
    #[serde(default)]
    pub departure: Option<Endpoint>,
    #[serde(default)]
    pub arrival: Option<Endpoint>,
}

/// Departure or arrival details.
#[derive(Debug, Deserialize)]
pub struct Endpoint {
    #[serde(default)]
    pub scheduled: Option<String>,
}

/// Provider-level error object.
#[derive(Debug, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl FlightRecord {
    fn into_sample(self) -> StatusSample {
        StatusSample::reported(
            self.flight_status,
            self.departure.and_then(|d| d.scheduled),
            self.arrival.and_then(|a| a.scheduled),
        )
    }
}

/// Interpret a decoded JSON body.
///
/// Anything short of a non-empty `data` array maps to [`StatusSample::NoData`].
pub fn sample_from_json(body: serde_json::Value) -> StatusSample {
    let response: FlightsResponse = match serde_json::from_value(body) {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(error = %e, "Unexpected provider payload shape");
            return StatusSample::NoData;
        }
    };

    if let Some(error) = &response.error {
        tracing::warn!(
            code = ?error.code,
            message = error.message.as_deref().unwrap_or(""),
            "Provider reported an error"
        );
    }

    response
        .data
        .and_then(|records| records.into_iter().next())
        .map(FlightRecord::into_sample)
        .unwrap_or(StatusSample::NoData)
}
