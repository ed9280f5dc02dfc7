//! Session opener error types.

use thiserror::Error;

/// Errors from opening a session against a chosen engine.
///
/// Surfaced to the orchestrating caller unchanged; no retries happen at
/// this level.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid session request: {0}")]
    Request(#[from] http::Error),

    #[error("websocket handshake with {address} failed: {source}")]
    Handshake {
        address: String,
        source: tokio_tungstenite::tungstenite::Error,
    },

    #[error("websocket transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("engine rejected document open: {0}")]
    Rejected(String),

    #[error("connection closed before the engine replied")]
    ClosedEarly,

    #[error("session open timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("failed to decode engine reply: {0}")]
    Decode(#[from] serde_json::Error),
}
