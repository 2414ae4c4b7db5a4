// Halfkey Config API
// TOML configuration for the driver shell

#[cfg(feature = "pure-rust")]
pub mod parser;

#[cfg(feature = "pure-rust")]
pub use parser::{Config, ConfigError, DEFAULT_POLL_TIMEOUT_MS, DEFAULT_PRIORITY};
