//! Discovery error types.

use thiserror::Error;

/// Errors from querying the engine discovery service.
///
/// These are upstream failures: the selection core never interprets
/// them, it hands them to its caller unchanged.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to connect to discovery at {address}: {source}")]
    Connect {
        address: String,
        source: std::io::Error,
    },

    #[error("invalid discovery request: {0}")]
    Http(#[from] http::Error),

    #[error("discovery request failed: {0}")]
    Request(#[from] hyper::Error),

    #[error("discovery returned status {0}")]
    Status(http::StatusCode),

    #[error("failed to decode discovery response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("discovery query timed out after {0:?}")]
    Timeout(std::time::Duration),
}
