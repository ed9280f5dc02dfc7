//! Weighted-probabilistic selection over remaining session slots.

use engine_core::EngineRecord;
use rand::Rng;

/// Weight for one record: remaining session slots under the threshold.
///
/// Without a threshold every record weighs the same and the draw
/// degenerates to a uniform random choice. With a threshold, a record
/// that cannot prove its load (no health block) weighs zero.
fn weight(record: &EngineRecord, threshold: Option<u32>) -> u64 {
    match threshold {
        None => 1,
        Some(t) => record
            .health
            .map(|h| u64::from(t.saturating_sub(h.active_sessions)))
            .unwrap_or(0),
    }
}

/// Pick one record with probability proportional to its weight.
///
/// Robust without pre-filtering: zero-weight records are excluded from
/// the draw, and a snapshot whose weights are all zero yields `None`.
/// Over many draws against a fixed snapshot, the pick-frequency ratio
/// between two records converges to the ratio of their weights.
///
/// Stateless across calls; the RNG is injected so tests can seed it.
pub fn weighted_load<'a, R: Rng>(
    snapshot: &'a [EngineRecord],
    threshold: Option<u32>,
    rng: &mut R,
) -> Option<&'a EngineRecord> {
    let weights: Vec<u64> = snapshot.iter().map(|r| weight(r, threshold)).collect();
    let total: u64 = weights.iter().sum();
    if total == 0 {
        return None;
    }

    let mut roll = rng.gen_range(0..total);
    for (record, w) in snapshot.iter().zip(&weights) {
        if roll < *w {
            return Some(record);
        }
        roll -= w;
    }
    // roll < total, so the loop above always returns.
    None
}

/// [`weighted_load`] with the process-global RNG.
pub fn weighted_load_default<'a>(
    snapshot: &'a [EngineRecord],
    threshold: Option<u32>,
) -> Option<&'a EngineRecord> {
    weighted_load(snapshot, threshold, &mut rand::thread_rng())
}
