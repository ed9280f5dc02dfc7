//! Configuration error types.

use thiserror::Error;

/// Errors raised while loading or validating service configuration.
///
/// All of these are fatal at startup; none are raised mid-request.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown selection strategy: {0} (expected roundrobin, leastload, or weighted)")]
    UnknownStrategy(String),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
