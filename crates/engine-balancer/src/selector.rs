//! Selection orchestration — capacity filter, then strategy dispatch.

use engine_core::{EngineRecord, Strategy};
use rand::Rng;
use tracing::{debug, warn};

use crate::error::{BalancerError, BalancerResult};
use crate::filter::filter_capacity;
use crate::least_load::least_load;
use crate::round_robin::RoundRobinBalancer;
use crate::weighted::weighted_load;

/// Per-context engine selector.
///
/// Owns the round-robin counter, so independent selection contexts (one
/// per discovery query key, for instance) keep independent cursors. The
/// strategy is resolved from its configured name once at startup
/// ([`Strategy::from_str`]); an unknown name never reaches this type.
pub struct EngineSelector {
    strategy: Strategy,
    threshold: Option<u32>,
    round_robin: RoundRobinBalancer,
}

impl EngineSelector {
    pub fn new(strategy: Strategy, threshold: Option<u32>) -> Self {
        Self {
            strategy,
            threshold,
            round_robin: RoundRobinBalancer::new(),
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn threshold(&self) -> Option<u32> {
        self.threshold
    }

    /// Select one engine from the snapshot.
    ///
    /// Applies the capacity filter, then the configured strategy. An
    /// empty filtered snapshot is an error; there is no fallback to the
    /// unfiltered inventory and no retry.
    pub fn select(&self, snapshot: &[EngineRecord]) -> BalancerResult<EngineRecord> {
        self.select_with_rng(snapshot, &mut rand::thread_rng())
    }

    /// Like [`select`](Self::select), with an injected RNG for the
    /// weighted strategy (seedable in tests).
    pub fn select_with_rng<R: Rng>(
        &self,
        snapshot: &[EngineRecord],
        rng: &mut R,
    ) -> BalancerResult<EngineRecord> {
        let eligible = filter_capacity(snapshot, self.threshold);
        if eligible.is_empty() {
            warn!(
                strategy = %self.strategy,
                total = snapshot.len(),
                "no eligible engine after capacity filter"
            );
            return Err(BalancerError::NoEligibleEngine);
        }

        let chosen = match self.strategy {
            Strategy::RoundRobin => self.round_robin.pick(&eligible),
            Strategy::LeastLoad => least_load(&eligible),
            Strategy::Weighted => weighted_load(&eligible, self.threshold, rng),
        };

        match chosen {
            Some(record) => {
                debug!(engine = %record.address, strategy = %self.strategy, "engine selected");
                Ok(record.clone())
            }
            None => Err(BalancerError::NoEligibleEngine),
        }
    }
}
