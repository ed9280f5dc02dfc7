//! Shared types used across the engine session service crates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Network identity of one engine instance.
///
/// The address is the stable identity of an engine: the same instance can
/// reappear at a different position in a later inventory snapshot, so
/// records compare by address, never by position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EngineAddress {
    pub host: String,
    pub port: u16,
}

impl EngineAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for EngineAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Live health metrics reported by discovery for one engine.
///
/// The three fields travel together: a record either carries a complete
/// health block or none at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineHealth {
    /// Free memory in bytes. Larger is better.
    pub memory_free: u64,
    /// CPU load figure. Smaller is better.
    pub cpu_total: u64,
    /// Sessions currently open on the engine.
    pub active_sessions: u32,
}

/// One engine instance as observed at snapshot time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineRecord {
    pub address: EngineAddress,
    /// Absent when discovery could not report a complete health block.
    /// Load-aware strategies skip such records; round-robin tolerates them.
    pub health: Option<EngineHealth>,
}

impl EngineRecord {
    pub fn new(address: EngineAddress) -> Self {
        Self {
            address,
            health: None,
        }
    }

    pub fn with_health(mut self, health: EngineHealth) -> Self {
        self.health = Some(health);
        self
    }

    pub fn active_sessions(&self) -> Option<u32> {
        self.health.map(|h| h.active_sessions)
    }
}

/// Selection strategy, resolved once at startup from its configured name.
///
/// An unknown name is a [`ConfigError`] raised before the service accepts
/// requests; strategy names are never re-parsed per selection call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    RoundRobin,
    LeastLoad,
    Weighted,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::RoundRobin => "roundrobin",
            Strategy::LeastLoad => "leastload",
            Strategy::Weighted => "weighted",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "roundrobin" => Ok(Strategy::RoundRobin),
            "leastload" => Ok(Strategy::LeastLoad),
            "weighted" => Ok(Strategy::Weighted),
            other => Err(ConfigError::UnknownStrategy(other.to_string())),
        }
    }
}
