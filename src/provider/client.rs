//! aviationstack HTTP client.
//!
//! # Responsibilities
//! - Query `GET /v1/flights` for the tracked flight
//! - Map transport, status and decoding failures to `FetchError`
//! - Degrade unusable payloads to the no-data sample

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::ProviderConfig;
use crate::monitor::{FlightIdent, StatusSample};
use crate::provider::types::{sample_from_json, FetchError, FetchResult};
use crate::provider::StatusProvider;

/// Status provider backed by the aviationstack REST API.
#[derive(Clone)]
pub struct AviationStackClient {
    client: Client,
    endpoint: String,
    access_key: String,
    flight: FlightIdent,
}

impl AviationStackClient {
    /// Create a client for one flight.
    pub fn new(config: &ProviderConfig, flight: FlightIdent) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("flight-watch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            access_key: config.access_key.clone(),
            flight,
        })
    }

    pub fn flight(&self) -> &FlightIdent {
        &self.flight
    }
}

#[async_trait]
impl StatusProvider for AviationStackClient {
    async fn fetch_status(&self) -> FetchResult<StatusSample> {
        let flight_iata = self.flight.iata();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("access_key", self.access_key.as_str()),
                ("flight_iata", flight_iata.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() && !status.is_client_error() {
            return Err(FetchError::Status(status.as_u16()));
        }

        // Rejected requests (bad key, quota) carry a JSON error object on 4xx.
        let bytes = response.bytes().await?;
        let body: serde_json::Value = match serde_json::from_slice(&bytes) {
            Ok(body) => body,
            Err(_) if status.is_client_error() => {
                return Err(FetchError::Status(status.as_u16()));
            }
            Err(e) => return Err(FetchError::Decode(e.to_string())),
        };

        if status.is_client_error() {
            tracing::warn!(flight = %flight_iata, status = status.as_u16(), "Provider rejected request");
        }

        let sample = sample_from_json(body);
        tracing::debug!(flight = %flight_iata, status = ?sample.status(), "Fetched flight status");
        Ok(sample)
    }
}

impl std::fmt::Debug for AviationStackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AviationStackClient")
            .field("endpoint", &self.endpoint)
            .field("flight", &self.flight)
            .finish()
    }
}
