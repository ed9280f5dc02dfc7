//! engine-discovery — HTTP client for the engine discovery service.
//!
//! Queries `GET /v1/query?properties=...` and converts the JSON response
//! into core `EngineRecord`s. Every query returns a fresh snapshot;
//! nothing is cached here. Failures are surfaced unchanged — the caller
//! owns retry policy.

pub mod client;
pub mod error;
pub mod wire;

pub use client::DiscoveryClient;
pub use error::DiscoveryError;
