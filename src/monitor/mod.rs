//! Flight status monitoring.
//!
//! # Data Flow
//! ```text
//! ┌──────────── poll cycle ────────────┐
//! │ fetch → render → compare → notify  │ → sleep(interval | retry_delay) ─┐
//! └────────────────────────────────────┘                                  │
//!        ▲                                                                 │
//!        └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Decisions
//! - Change detection compares rendered text, not individual fields
//! - Fetch failures are transient: fixed retry delay, no limit
//! - Only the shutdown signal ends the loop

pub mod poller;
pub mod sample;
pub mod state;

pub use poller::{CycleOutcome, Poller};
pub use sample::{FlightIdent, Route, StatusSample};
pub use state::{MonitorState, PollPhase};
