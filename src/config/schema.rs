//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the monitor.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the flight monitor.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WatchConfig {
    /// Flight being tracked.
    pub flight: FlightConfig,

    /// Status provider (aviationstack) settings.
    pub provider: ProviderConfig,

    /// Poll loop timing.
    pub monitor: MonitorConfig,

    /// E-mail notification settings.
    pub email: EmailConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Flight selection.
///
/// Airline and number are usually left empty in the file and supplied on
/// the command line or at the interactive prompt.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FlightConfig {
    /// IATA airline code (e.g., "AA").
    pub airline: String,

    /// Flight number without the airline prefix (e.g., "100").
    pub number: String,

    /// Origin city, informational only.
    pub origin: Option<String>,

    /// Destination city, informational only.
    pub destination: Option<String>,
}

/// Status provider configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Flights endpoint URL.
    pub endpoint: String,

    /// API access key. Prefer the `FLIGHT_WATCH_ACCESS_KEY` environment variable.
    pub access_key: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://api.aviationstack.com/v1/flights".to_string(),
            access_key: String::new(),
            timeout_secs: 30,
        }
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("endpoint", &self.endpoint)
            .field("access_key", &redacted(&self.access_key))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Poll loop configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Delay between successful polls in seconds.
    pub interval_secs: u64,

    /// Fixed delay after a failed fetch in seconds.
    pub retry_delay_secs: u64,

    /// Keep a change pending when its notification fails, so the next
    /// cycle sends it again.
    pub redeliver_failed: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: 60,
            retry_delay_secs: 60,
            redeliver_failed: false,
        }
    }
}

/// SMTP notification configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EmailConfig {
    /// Send e-mail. When disabled, updates are only logged.
    pub enabled: bool,

    /// SMTP relay host.
    pub smtp_host: String,

    /// SMTP relay port (STARTTLS).
    pub smtp_port: u16,

    /// Sender address.
    pub sender: String,

    /// Recipient address.
    pub recipient: String,

    /// Login name. Falls back to the sender address when empty.
    pub username: String,

    /// Relay password. Prefer the `FLIGHT_WATCH_SMTP_PASSWORD` environment variable.
    pub password: String,

    /// Subject line.
    pub subject: String,
}

impl EmailConfig {
    /// Login name used for relay authentication.
    pub fn login(&self) -> &str {
        if self.username.is_empty() {
            &self.sender
        } else {
            &self.username
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            sender: String::new(),
            recipient: String::new(),
            username: String::new(),
            password: String::new(),
            subject: "Flight Status Update".to_string(),
        }
    }
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("enabled", &self.enabled)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("sender", &self.sender)
            .field("recipient", &self.recipient)
            .field("username", &self.username)
            .field("password", &redacted(&self.password))
            .field("subject", &self.subject)
            .finish()
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}
