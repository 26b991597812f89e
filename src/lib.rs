//! Flight status monitor library.

pub mod config;
pub mod lifecycle;
pub mod monitor;
pub mod notify;
pub mod observability;
pub mod provider;

pub use config::schema::WatchConfig;
pub use lifecycle::Shutdown;
pub use monitor::{MonitorState, Poller, StatusSample};
