//! Round-robin selection backed by an atomic counter.
//!
//! The counter is never rebased to the snapshot size: each call takes the
//! modulo against the current length, so the cursor self-adjusts when the
//! inventory grows or shrinks between calls. When the inventory changes,
//! the next pick may skip or repeat a logical instance relative to
//! identity-based tracking; that is accepted behavior.

use std::sync::atomic::{AtomicUsize, Ordering};

use engine_core::EngineRecord;

/// Cyclic index selection over a pool of changing size.
///
/// Uses `AtomicUsize` for lock-free concurrent selection: no two
/// concurrent calls observe the same pre-increment counter value. The
/// counter starts at zero, only grows, and is never persisted.
pub struct RoundRobinBalancer {
    counter: AtomicUsize,
}

impl RoundRobinBalancer {
    pub fn new() -> Self {
        Self {
            counter: AtomicUsize::new(0),
        }
    }

    /// Next index into a pool of `count` entries.
    ///
    /// Returns `None` and leaves the counter untouched when `count` is
    /// zero.
    pub fn next(&self, count: usize) -> Option<usize> {
        if count == 0 {
            return None;
        }
        let idx = self.counter.fetch_add(1, Ordering::Relaxed);
        Some(idx % count)
    }

    /// Pick the next record, cycling in snapshot order.
    pub fn pick<'a>(&self, snapshot: &'a [EngineRecord]) -> Option<&'a EngineRecord> {
        self.next(snapshot.len()).map(|idx| &snapshot[idx])
    }

    /// Current counter value (for diagnostics).
    pub fn current(&self) -> usize {
        self.counter.load(Ordering::Relaxed)
    }
}

impl Default for RoundRobinBalancer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::EngineAddress;

    fn engine(ip: &str) -> EngineRecord {
        EngineRecord::new(EngineAddress::new(ip, 9076))
    }

    #[test]
    fn cycles_through_indices() {
        let lb = RoundRobinBalancer::new();

        assert_eq!(lb.next(3), Some(0));
        assert_eq!(lb.next(3), Some(1));
        assert_eq!(lb.next(3), Some(2));
        assert_eq!(lb.next(3), Some(0)); // wraps
        assert_eq!(lb.next(3), Some(1));
    }

    #[test]
    fn empty_pool_returns_none_without_advancing() {
        let lb = RoundRobinBalancer::new();
        assert_eq!(lb.pick(&[]), None);
        assert_eq!(lb.current(), 0);

        // A later non-empty pick starts at index 0.
        let snapshot = vec![engine("192.168.0.1"), engine("192.168.0.2")];
        assert_eq!(lb.pick(&snapshot), Some(&snapshot[0]));
    }

    #[test]
    fn single_engine_is_picked_repeatedly() {
        let lb = RoundRobinBalancer::new();
        let snapshot = vec![engine("192.168.0.1")];

        for _ in 0..10 {
            assert_eq!(lb.pick(&snapshot), Some(&snapshot[0]));
        }
    }

    #[test]
    fn visits_each_engine_once_per_cycle() {
        let lb = RoundRobinBalancer::new();
        let snapshot = vec![
            engine("192.168.0.1"),
            engine("192.168.0.2"),
            engine("192.168.0.3"),
            engine("192.168.0.4"),
        ];

        for expected in &snapshot {
            assert_eq!(lb.pick(&snapshot), Some(expected));
        }
        assert_eq!(lb.pick(&snapshot), Some(&snapshot[0]));
    }

    #[test]
    fn shrinking_pool_wraps_on_accumulated_counter() {
        let lb = RoundRobinBalancer::new();
        let four = vec![
            engine("192.168.0.1"),
            engine("192.168.0.2"),
            engine("192.168.0.3"),
            engine("192.168.0.4"),
        ];
        assert_eq!(lb.pick(&four), Some(&four[0]));
        assert_eq!(lb.pick(&four), Some(&four[1]));

        // counter = 2, pool shrinks to 2: next index is 2 % 2 = 0.
        let two = vec![engine("192.168.0.1"), engine("192.168.0.2")];
        assert_eq!(lb.pick(&two), Some(&two[0]));
        assert_eq!(lb.pick(&two), Some(&two[1]));
    }

    #[test]
    fn growing_pool_continues_from_counter() {
        let lb = RoundRobinBalancer::new();
        let two = vec![engine("192.168.0.1"), engine("192.168.0.2")];
        assert_eq!(lb.pick(&two), Some(&two[0]));
        assert_eq!(lb.pick(&two), Some(&two[1]));

        let three = vec![
            engine("192.168.0.1"),
            engine("192.168.0.2"),
            engine("192.168.0.3"),
        ];
        assert_eq!(lb.pick(&three), Some(&three[2]));
        assert_eq!(lb.pick(&three), Some(&three[0]));
    }

    #[test]
    fn concurrent_increments_are_not_lost() {
        use std::sync::Arc;
        use std::thread;

        let lb = Arc::new(RoundRobinBalancer::new());
        let mut handles = vec![];

        for _ in 0..4 {
            let lb = lb.clone();
            handles.push(thread::spawn(move || {
                let mut results = Vec::new();
                for _ in 0..100 {
                    results.push(lb.next(4).unwrap());
                }
                results
            }));
        }

        let mut all: Vec<usize> = vec![];
        for h in handles {
            all.extend(h.join().unwrap());
        }

        // 400 total selections, counter must be exactly 400.
        assert_eq!(lb.current(), 400);
        assert!(all.iter().all(|&idx| idx < 4));
    }
}
