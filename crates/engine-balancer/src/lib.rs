//! engine-balancer — engine selection strategies and capacity filtering.
//!
//! Reduces an inventory snapshot (`&[EngineRecord]`) to at most one chosen
//! engine:
//!
//! - Capacity filter drops engines at or above the session ceiling
//! - Round-robin cycles an atomic counter across the snapshot
//! - Least-load picks the engine with the most free memory
//! - Weighted draw picks proportionally to remaining session slots
//!
//! # Architecture
//!
//! ```text
//! EngineSelector
//!   ├── filter_capacity (session ceiling gate)
//!   └── Strategy dispatch
//!       ├── RoundRobinBalancer (lock-free index selection)
//!       ├── least_load (pure, max free memory)
//!       └── weighted_load (single weighted draw, injected RNG)
//! ```
//!
//! Snapshots are fresh per selection call and never mutated here. The only
//! state carried across calls is the round-robin counter, owned by the
//! selector instance.

pub mod error;
pub mod filter;
pub mod least_load;
pub mod round_robin;
pub mod selector;
pub mod weighted;

pub use error::{BalancerError, BalancerResult};
pub use filter::filter_capacity;
pub use least_load::least_load;
pub use round_robin::RoundRobinBalancer;
pub use selector::EngineSelector;
pub use weighted::{weighted_load, weighted_load_default};
