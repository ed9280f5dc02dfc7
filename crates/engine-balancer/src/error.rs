//! Balancer error types.

use thiserror::Error;

/// Errors that can occur during engine selection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BalancerError {
    /// Filtering and strategy evaluation left no engine to choose. The
    /// caller decides whether to retry against a fresh snapshot or report
    /// the service unavailable.
    #[error("no eligible engine in inventory")]
    NoEligibleEngine,
}

pub type BalancerResult<T> = Result<T, BalancerError>;
