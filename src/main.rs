//! flight-watch
//!
//! Polls a flight-status API and e-mails the requester whenever the
//! flight's status changes.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                         FLIGHT WATCH                          │
//!   │                                                               │
//!   │  ┌──────────┐   ┌──────────────┐   ┌─────────────────────┐    │
//!   │  │  config  │──▶│  lifecycle   │──▶│   monitor::Poller   │    │
//!   │  │ + prompt │   │   startup    │   │ fetch/compare/notify│    │
//!   │  └──────────┘   └──────────────┘   └──────┬───────┬──────┘    │
//!   │                                           │       │           │
//!   │                                           ▼       ▼           │
//!   │                                  ┌──────────┐ ┌──────────┐    │
//!   │   aviationstack  ◀───────────────│ provider │ │  notify  │────┼──▶ SMTP relay
//!   │                                  └──────────┘ └──────────┘    │
//!   │                                                               │
//!   │  Cross-cutting: observability (tracing, metrics),             │
//!   │                 lifecycle (signals, shutdown)                 │
//!   └──────────────────────────────────────────────────────────────┘
//! ```

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;

use flight_watch::lifecycle::startup::{flight_ident, prepare_config, route, Overrides};
use flight_watch::lifecycle::Shutdown;
use flight_watch::monitor::{MonitorState, Poller};
use flight_watch::notify::{EmailNotifier, LogNotifier, Notifier};
use flight_watch::observability::{logging, metrics};
use flight_watch::provider::{AviationStackClient, StatusProvider};

#[derive(Parser)]
#[command(name = "flight-watch", version)]
#[command(about = "Poll a flight's status and e-mail on every change", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Airline code (e.g., AA).
    #[arg(long)]
    airline: Option<String>,

    /// Flight number without the airline code.
    #[arg(long)]
    flight_number: Option<String>,

    /// Origin city (informational).
    #[arg(long)]
    origin: Option<String>,

    /// Destination city (informational).
    #[arg(long)]
    destination: Option<String>,

    /// Seconds between polls.
    #[arg(long)]
    interval_secs: Option<u64>,

    /// Status provider access key.
    #[arg(long, env = "FLIGHT_WATCH_ACCESS_KEY", hide_env_values = true)]
    access_key: Option<String>,

    /// SMTP relay password.
    #[arg(long, env = "FLIGHT_WATCH_SMTP_PASSWORD", hide_env_values = true)]
    smtp_password: Option<String>,

    /// Log status changes instead of e-mailing them.
    #[arg(long)]
    dry_run: bool,

    /// Print the current status once and exit.
    #[arg(long)]
    once: bool,

    /// Never prompt for missing flight details.
    #[arg(long)]
    no_prompt: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            airline: self.airline.clone(),
            flight_number: self.flight_number.clone(),
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            interval_secs: self.interval_secs,
            access_key: self.access_key.clone(),
            smtp_password: self.smtp_password.clone(),
            dry_run: self.dry_run || self.once,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let interactive = !cli.no_prompt && std::io::stdin().is_terminal();
    let config = match prepare_config(cli.config.as_deref(), &cli.overrides(), interactive) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("flight-watch: {}", e);
            std::process::exit(2);
        }
    };

    logging::init_logging(&config.observability);
    tracing::info!("flight-watch v{} starting", env!("CARGO_PKG_VERSION"));

    let flight = flight_ident(&config);
    tracing::info!(
        flight = %flight,
        interval_secs = config.monitor.interval_secs,
        retry_delay_secs = config.monitor.retry_delay_secs,
        email_enabled = config.email.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let provider = AviationStackClient::new(&config.provider, flight.clone())?;

    if cli.once {
        let sample = provider.fetch_status().await?;
        println!("{}", sample.render(&flight));
        return Ok(());
    }

    let notifier: Box<dyn Notifier> = if config.email.enabled {
        Box::new(EmailNotifier::new(&config.email)?)
    } else {
        tracing::warn!("E-mail disabled; status changes will only be logged");
        Box::new(LogNotifier)
    };

    let poller = Poller::new(provider, notifier, flight, &config.monitor).with_route(route(&config));

    let shutdown = Shutdown::new();
    let loop_shutdown = shutdown.subscribe();
    let signals = shutdown.trigger_on_signal();

    tracing::info!("Monitoring flight... Press Ctrl+C to stop.");
    let state = poller.run(MonitorState::new(), loop_shutdown).await;
    signals.abort();

    tracing::info!(
        cycles = state.cycles(),
        notifications = state.notifications_sent(),
        "Shutdown complete"
    );
    Ok(())
}
