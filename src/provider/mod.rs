//! Flight status provider subsystem.
//!
//! # Data Flow
//! ```text
//! Poller
//!     → StatusProvider::fetch_status()
//!     → client.rs (HTTP GET /v1/flights?access_key=..&flight_iata=..)
//!     → types.rs (JSON → StatusSample, or NoData)
//! ```
//!
//! # Design Decisions
//! - The poller only sees the trait; tests substitute scripted providers
//! - Transport and decoding failures are errors; unusable payloads are NoData

pub mod client;
pub mod types;

use async_trait::async_trait;

use crate::monitor::StatusSample;

pub use client::AviationStackClient;
pub use types::{FetchError, FetchResult};

/// Source of flight status samples.
#[async_trait]
pub trait StatusProvider: Send + Sync {
    /// Fetch the current status of the tracked flight.
    async fn fetch_status(&self) -> FetchResult<StatusSample>;
}
