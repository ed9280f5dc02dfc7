//! Capacity filter — drops engines at or above the session ceiling.

use engine_core::EngineRecord;
use tracing::debug;

/// Keep the records whose active-session count is below `threshold`.
///
/// With no threshold the snapshot passes through untouched, including
/// records without health data. With a threshold set, a record must carry
/// health metrics to prove it has capacity; records without them are
/// excluded. Relative order is always preserved. Never errors: a fully
/// excluded snapshot yields an empty vec.
pub fn filter_capacity(snapshot: &[EngineRecord], threshold: Option<u32>) -> Vec<EngineRecord> {
    let Some(threshold) = threshold else {
        return snapshot.to_vec();
    };

    let eligible: Vec<EngineRecord> = snapshot
        .iter()
        .filter(|r| r.health.is_some_and(|h| h.active_sessions < threshold))
        .cloned()
        .collect();

    if eligible.len() < snapshot.len() {
        debug!(
            total = snapshot.len(),
            eligible = eligible.len(),
            threshold,
            "capacity filter excluded engines"
        );
    }
    eligible
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::{EngineAddress, EngineHealth};

    fn engine(ip: &str, active_sessions: u32) -> EngineRecord {
        EngineRecord::new(EngineAddress::new(ip, 9076)).with_health(EngineHealth {
            memory_free: 1024,
            cpu_total: 100,
            active_sessions,
        })
    }

    #[test]
    fn no_threshold_is_identity() {
        let snapshot = vec![engine("192.168.0.1", 99), engine("192.168.0.2", 120)];
        let filtered = filter_capacity(&snapshot, None);
        assert_eq!(filtered, snapshot);
    }

    #[test]
    fn threshold_excludes_engines_at_or_above() {
        let snapshot = vec![engine("192.168.0.1", 99), engine("192.168.0.2", 120)];
        let filtered = filter_capacity(&snapshot, Some(100));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].address.host, "192.168.0.1");
    }

    #[test]
    fn engine_exactly_at_threshold_is_excluded() {
        let snapshot = vec![engine("192.168.0.1", 100)];
        assert!(filter_capacity(&snapshot, Some(100)).is_empty());
    }

    #[test]
    fn order_is_preserved() {
        let snapshot = vec![
            engine("192.168.0.4", 10),
            engine("192.168.0.1", 200),
            engine("192.168.0.2", 20),
            engine("192.168.0.3", 30),
        ];
        let filtered = filter_capacity(&snapshot, Some(100));
        let hosts: Vec<&str> = filtered.iter().map(|r| r.address.host.as_str()).collect();
        assert_eq!(hosts, ["192.168.0.4", "192.168.0.2", "192.168.0.3"]);
    }

    #[test]
    fn all_excluded_yields_empty() {
        let snapshot = vec![engine("192.168.0.1", 150), engine("192.168.0.2", 151)];
        assert!(filter_capacity(&snapshot, Some(100)).is_empty());
    }

    #[test]
    fn record_without_health_is_excluded_under_threshold() {
        let snapshot = vec![
            EngineRecord::new(EngineAddress::new("192.168.0.1", 9076)),
            engine("192.168.0.2", 10),
        ];
        let filtered = filter_capacity(&snapshot, Some(100));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].address.host, "192.168.0.2");
    }

    #[test]
    fn record_without_health_passes_without_threshold() {
        let snapshot = vec![EngineRecord::new(EngineAddress::new("192.168.0.1", 9076))];
        assert_eq!(filter_capacity(&snapshot, None).len(), 1);
    }

    #[test]
    fn empty_snapshot_stays_empty() {
        assert!(filter_capacity(&[], Some(100)).is_empty());
        assert!(filter_capacity(&[], None).is_empty());
    }
}
