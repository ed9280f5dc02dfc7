//! Service configuration — TOML file with environment overrides.
//!
//! Precedence, lowest to highest: built-in defaults, config file,
//! environment variables. Everything is validated once at load; the
//! process refuses to start on a malformed value.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Strategy;

pub const DEFAULT_PORT: u16 = 9455;
pub const DEFAULT_DISCOVERY_HOST: &str = "localhost";
pub const DEFAULT_DISCOVERY_PORT: u16 = 9100;
pub const DEFAULT_SESSION_TTL_SECS: u64 = 60;

/// Resolved service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Port the HTTP surface listens on.
    pub port: u16,
    /// Host of the engine discovery service.
    pub discovery_host: String,
    /// Port of the engine discovery service.
    pub discovery_port: u16,
    /// Selection strategy applied to every session request.
    pub strategy: Strategy,
    /// Max active sessions per engine before it is excluded from
    /// selection. `None` means unlimited.
    pub session_threshold: Option<u32>,
    /// Seconds an engine keeps a session alive after the opening socket
    /// disconnects.
    pub session_ttl_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            discovery_host: DEFAULT_DISCOVERY_HOST.to_string(),
            discovery_port: DEFAULT_DISCOVERY_PORT,
            strategy: Strategy::RoundRobin,
            session_threshold: None,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
        }
    }
}

/// Raw config file shape: every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigFile {
    server: Option<ServerSection>,
    discovery: Option<DiscoverySection>,
    session: Option<SessionSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ServerSection {
    port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DiscoverySection {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SessionSection {
    strategy: Option<String>,
    threshold: Option<u32>,
    ttl_secs: Option<u64>,
}

impl ServiceConfig {
    /// Load configuration: defaults, then the file at `path` (if given),
    /// then environment variables on top.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.with_env_overrides(&std::env::vars().collect())
    }

    /// Parse a TOML config file over the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        let mut config = Self::default();

        if let Some(server) = file.server
            && let Some(port) = server.port
        {
            config.port = port;
        }
        if let Some(discovery) = file.discovery {
            if let Some(host) = discovery.host {
                config.discovery_host = host;
            }
            if let Some(port) = discovery.port {
                config.discovery_port = port;
            }
        }
        if let Some(session) = file.session {
            if let Some(strategy) = session.strategy {
                config.strategy = strategy.parse()?;
            }
            if let Some(threshold) = session.threshold {
                config.session_threshold = Some(threshold);
            }
            if let Some(ttl) = session.ttl_secs {
                config.session_ttl_secs = ttl;
            }
        }
        Ok(config)
    }

    /// Resolve configuration from the environment over the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides(&std::env::vars().collect())
    }

    /// Apply environment variable overrides on top of `self`.
    ///
    /// Recognized keys: `PORT`, `DISCOVERY_HOST`, `DISCOVERY_PORT`,
    /// `SESSION_STRATEGY`, `SESSIONS_PER_ENGINE_THRESHOLD`, `SESSION_TTL`.
    pub fn with_env_overrides(
        mut self,
        vars: &HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        if let Some(port) = vars.get("PORT") {
            self.port = parse_var("PORT", port)?;
        }
        if let Some(host) = vars.get("DISCOVERY_HOST") {
            self.discovery_host = host.clone();
        }
        if let Some(port) = vars.get("DISCOVERY_PORT") {
            self.discovery_port = parse_var("DISCOVERY_PORT", port)?;
        }
        if let Some(strategy) = vars.get("SESSION_STRATEGY") {
            self.strategy = strategy.parse()?;
        }
        if let Some(threshold) = vars.get("SESSIONS_PER_ENGINE_THRESHOLD") {
            self.session_threshold =
                Some(parse_var("SESSIONS_PER_ENGINE_THRESHOLD", threshold)?);
        }
        if let Some(ttl) = vars.get("SESSION_TTL") {
            self.session_ttl_secs = parse_var("SESSION_TTL", ttl)?;
        }
        Ok(self)
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
