//! Least-load selection — most free memory, then least CPU.

use std::cmp::Reverse;

use engine_core::EngineRecord;

/// Pick the record with the most free memory; among ties, the one with
/// the smallest CPU total. Records without health metrics are unusable
/// here and are skipped. Among records tied on both metrics, which one is
/// returned is unspecified.
///
/// Pure function: no state across calls, never mutates the snapshot.
pub fn least_load(snapshot: &[EngineRecord]) -> Option<&EngineRecord> {
    snapshot
        .iter()
        .filter_map(|r| r.health.map(|h| (r, h)))
        .min_by_key(|(_, h)| (Reverse(h.memory_free), h.cpu_total))
        .map(|(r, _)| r)
}
