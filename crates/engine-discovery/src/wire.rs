//! Wire format of the discovery query response.
//!
//! The discovery service reports engines as an array of entries with
//! nested health metrics. Conversion into core records is lossy on
//! purpose: a health block missing any of its three metrics collapses to
//! no health at all, so load-aware strategies never act on partial data.

use engine_core::{EngineAddress, EngineHealth, EngineRecord};
use serde::Deserialize;

/// One entry of the discovery response array.
#[derive(Debug, Deserialize)]
pub struct WireEntry {
    pub engine: WireEngine,
}

#[derive(Debug, Deserialize)]
pub struct WireEngine {
    pub ip: String,
    pub port: u16,
    #[serde(default)]
    pub health: Option<WireHealth>,
}

#[derive(Debug, Deserialize)]
pub struct WireHealth {
    #[serde(default)]
    pub mem: Option<WireMem>,
    #[serde(default)]
    pub cpu: Option<WireCpu>,
    #[serde(default)]
    pub active_sessions: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct WireMem {
    pub free: u64,
}

#[derive(Debug, Deserialize)]
pub struct WireCpu {
    pub total: u64,
}

impl WireEntry {
    /// Convert into a core record.
    pub fn into_record(self) -> EngineRecord {
        let WireEngine { ip, port, health } = self.engine;
        let health = health.and_then(|h| {
            match (h.mem, h.cpu, h.active_sessions) {
                (Some(mem), Some(cpu), Some(active_sessions)) => Some(EngineHealth {
                    memory_free: mem.free,
                    cpu_total: cpu.total,
                    active_sessions,
                }),
                _ => None,
            }
        });

        let mut record = EngineRecord::new(EngineAddress::new(ip, port));
        if let Some(health) = health {
            record = record.with_health(health);
        }
        record
    }
}
