//! Flight identity and status samples.

use std::fmt;

/// Status reported when the provider omits `flight_status`.
pub const UNKNOWN_STATUS: &str = "unknown";

/// Text rendered for the no-data sentinel.
pub const NO_DATA_MESSAGE: &str = "No flight data found.";

/// The flight being tracked: airline code plus flight number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlightIdent {
    airline: String,
    number: String,
}

impl FlightIdent {
    /// Build an identifier, trimming both parts and upper-casing the airline.
    pub fn new(airline: &str, number: &str) -> Self {
        Self {
            airline: airline.trim().to_ascii_uppercase(),
            number: number.trim().to_string(),
        }
    }

    pub fn airline(&self) -> &str {
        &self.airline
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    /// IATA flight code as sent to the provider (e.g., "AA100").
    pub fn iata(&self) -> String {
        format!("{}{}", self.airline, self.number)
    }
}

impl fmt::Display for FlightIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.airline, self.number)
    }
}

/// Origin and destination labels collected at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Route {
    pub origin: Option<String>,
    pub destination: Option<String>,
}

impl Route {
    /// One-line description, or `None` when neither end is known.
    pub fn describe(&self) -> Option<String> {
        match (self.origin.as_deref(), self.destination.as_deref()) {
            (None, None) => None,
            (origin, destination) => Some(format!(
                "{} -> {}",
                origin.unwrap_or("?"),
                destination.unwrap_or("?")
            )),
        }
    }
}

/// Result of one successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSample {
    /// The provider returned a record for the flight.
    Reported {
        status: String,
        departure_time: Option<String>,
        arrival_time: Option<String>,
    },
    /// The provider answered but had nothing usable for the flight.
    NoData,
}

impl StatusSample {
    /// Build a reported sample, substituting [`UNKNOWN_STATUS`] for a missing status.
    pub fn reported(
        status: Option<String>,
        departure_time: Option<String>,
        arrival_time: Option<String>,
    ) -> Self {
        StatusSample::Reported {
            status: status
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
            departure_time,
            arrival_time,
        }
    }

    /// Status keyword, if any.
    pub fn status(&self) -> Option<&str> {
        match self {
            StatusSample::Reported { status, .. } => Some(status),
            StatusSample::NoData => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, StatusSample::NoData)
    }

    /// Canonical text used for change detection and message bodies.
    pub fn render(&self, flight: &FlightIdent) -> String {
        match self {
            StatusSample::Reported {
                status,
                departure_time,
                arrival_time,
            } => format!(
                "Flight {} status: {}\nDeparture: {}\nArrival: {}",
                flight,
                status,
                departure_time.as_deref().unwrap_or(UNKNOWN_STATUS),
                arrival_time.as_deref().unwrap_or(UNKNOWN_STATUS),
            ),
            StatusSample::NoData => NO_DATA_MESSAGE.to_string(),
        }
    }
}
