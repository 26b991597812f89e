//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → lifecycle::startup (CLI flags, environment, prompts)
//!     → validation.rs (semantic checks)
//!     → WatchConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once the poll loop starts
//! - All fields have defaults to allow minimal configs
//! - Secrets never appear in Debug output
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use schema::EmailConfig;
pub use schema::FlightConfig;
pub use schema::LogFormat;
pub use schema::MonitorConfig;
pub use schema::ObservabilityConfig;
pub use schema::ProviderConfig;
pub use schema::WatchConfig;
