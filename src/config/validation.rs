//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (intervals > 0, endpoint is a URL)
//! - Check that required secrets are present for enabled features
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: WatchConfig → Result<(), Vec<ValidationError>>
//! - Runs before the poll loop starts

use std::fmt;

use lettre::message::Mailbox;

use crate::config::schema::WatchConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g., "monitor.interval_secs").
    pub field: &'static str,
    /// Human-readable reason.
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a fully merged configuration.
pub fn validate_config(config: &WatchConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let airline = config.flight.airline.trim();
    if airline.is_empty() {
        errors.push(ValidationError::new("flight.airline", "is required"));
    } else if !(2..=3).contains(&airline.len())
        || !airline.chars().all(|c| c.is_ascii_alphanumeric())
    {
        errors.push(ValidationError::new(
            "flight.airline",
            format!("'{}' is not a 2-3 character airline code", airline),
        ));
    }

    let number = config.flight.number.trim();
    if number.is_empty() {
        errors.push(ValidationError::new("flight.number", "is required"));
    } else if number.len() > 5 || !number.chars().all(|c| c.is_ascii_alphanumeric()) {
        errors.push(ValidationError::new(
            "flight.number",
            format!("'{}' is not a flight number", number),
        ));
    }

    match url::Url::parse(&config.provider.endpoint) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            "provider.endpoint",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(
            "provider.endpoint",
            format!("invalid URL: {}", e),
        )),
    }

    if config.provider.access_key.is_empty() {
        errors.push(ValidationError::new(
            "provider.access_key",
            "is required (set FLIGHT_WATCH_ACCESS_KEY)",
        ));
    }

    if config.provider.timeout_secs == 0 {
        errors.push(ValidationError::new("provider.timeout_secs", "must be > 0"));
    }

    if config.monitor.interval_secs == 0 {
        errors.push(ValidationError::new("monitor.interval_secs", "must be > 0"));
    }

    if config.monitor.retry_delay_secs == 0 {
        errors.push(ValidationError::new("monitor.retry_delay_secs", "must be > 0"));
    }

    if config.email.enabled {
        let email = &config.email;
        if email.smtp_host.is_empty() {
            errors.push(ValidationError::new("email.smtp_host", "is required"));
        }
        if email.smtp_port == 0 {
            errors.push(ValidationError::new("email.smtp_port", "must be > 0"));
        }
        if let Err(e) = email.sender.parse::<Mailbox>() {
            errors.push(ValidationError::new(
                "email.sender",
                format!("'{}' is not an e-mail address: {}", email.sender, e),
            ));
        }
        if let Err(e) = email.recipient.parse::<Mailbox>() {
            errors.push(ValidationError::new(
                "email.recipient",
                format!("'{}' is not an e-mail address: {}", email.recipient, e),
            ));
        }
        if email.password.is_empty() {
            errors.push(ValidationError::new(
                "email.password",
                "is required (set FLIGHT_WATCH_SMTP_PASSWORD)",
            ));
        }
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
