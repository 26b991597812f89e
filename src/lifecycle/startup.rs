//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the optional config file
//! - Apply command-line and environment overrides
//! - Prompt the operator for flight details that are still missing
//! - Validate the merged configuration
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Precedence: defaults < file < flags/env < prompts (missing values only)
//! - Prompt answers are used as given; nothing is silently replaced

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::config::loader::{finalize, read_config};
use crate::config::{ConfigError, FlightConfig, WatchConfig};
use crate::monitor::{FlightIdent, Route};

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub airline: Option<String>,
    pub flight_number: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub interval_secs: Option<u64>,
    pub access_key: Option<String>,
    pub smtp_password: Option<String>,
    /// Log updates instead of e-mailing them.
    pub dry_run: bool,
}

/// Merge overrides into a configuration in place.
pub fn apply_overrides(config: &mut WatchConfig, overrides: &Overrides) {
    if let Some(airline) = &overrides.airline {
        config.flight.airline = airline.clone();
    }
    if let Some(number) = &overrides.flight_number {
        config.flight.number = number.clone();
    }
    if let Some(origin) = &overrides.origin {
        config.flight.origin = Some(origin.clone());
    }
    if let Some(destination) = &overrides.destination {
        config.flight.destination = Some(destination.clone());
    }
    if let Some(interval) = overrides.interval_secs {
        config.monitor.interval_secs = interval;
    }
    if let Some(key) = &overrides.access_key {
        config.provider.access_key = key.clone();
    }
    if let Some(password) = &overrides.smtp_password {
        config.email.password = password.clone();
    }
    if overrides.dry_run {
        config.email.enabled = false;
    }
}

/// Whether the flight is not yet fully identified.
pub fn needs_prompt(flight: &FlightConfig) -> bool {
    flight.airline.trim().is_empty() || flight.number.trim().is_empty()
}

/// Ask for every flight field that is still missing.
///
/// Blank answers leave the field missing; validation reports it afterwards.
pub fn prompt_flight<R: BufRead, W: Write>(
    flight: &mut FlightConfig,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    if flight.airline.trim().is_empty() {
        flight.airline = ask(
            input,
            output,
            "Enter the airline code (e.g., AA for American Airlines): ",
        )?
        .to_ascii_uppercase();
    }
    if flight.number.trim().is_empty() {
        flight.number = ask(input, output, "Enter the flight number: ")?;
    }
    if flight.origin.is_none() {
        flight.origin = non_empty(ask(input, output, "Enter the origin city: ")?);
    }
    if flight.destination.is_none() {
        flight.destination = non_empty(ask(input, output, "Enter the destination city: ")?);
    }
    Ok(())
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<String> {
    output.write_all(question.as_bytes())?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Build the validated configuration for this run.
///
/// Prompts on stdin/stdout only when `interactive` is set and the flight is
/// incomplete after file and overrides.
pub fn prepare_config(
    path: Option<&Path>,
    overrides: &Overrides,
    interactive: bool,
) -> Result<WatchConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => WatchConfig::default(),
    };

    apply_overrides(&mut config, overrides);

    if interactive && needs_prompt(&config.flight) {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();
        prompt_flight(&mut config.flight, &mut input, &mut output).map_err(ConfigError::Io)?;
    }

    finalize(config)
}

/// Flight identifier from a validated configuration.
pub fn flight_ident(config: &WatchConfig) -> FlightIdent {
    FlightIdent::new(&config.flight.airline, &config.flight.number)
}

/// Route labels from a configuration.
pub fn route(config: &WatchConfig) -> Route {
    Route {
        origin: config.flight.origin.clone(),
        destination: config.flight.destination.clone(),
    }
}
