//! Metrics collection and exposition.
//!
//! # Metrics
//! - `flight_watch_polls_total` (counter): poll cycles by outcome
//! - `flight_watch_status_changes_total` (counter): detected status changes
//! - `flight_watch_notifications_total` (counter): deliveries by result
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

/// Count one finished poll cycle.
pub fn record_poll(outcome: &'static str) {
    metrics::counter!("flight_watch_polls_total", "outcome" => outcome).increment(1);
}

/// Count one detected status change.
pub fn record_status_change() {
    metrics::counter!("flight_watch_status_changes_total").increment(1);
}

/// Count one notification attempt.
pub fn record_notification(success: bool) {
    let result = if success { "sent" } else { "failed" };
    metrics::counter!("flight_watch_notifications_total", "result" => result).increment(1);
}
