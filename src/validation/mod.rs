//! URL validation
//!
//! Probing single URLs over HTTP, and the worker pool that deduplicates
//! links, bounds concurrency and backs off from rate-limited hosts.

pub mod cooldown;
pub mod gate;
pub mod pool;
pub mod probe;

// Re-export commonly used items
pub use cooldown::{CooldownTable, host_key};
pub use gate::DedupGate;
pub use pool::{PoolSettings, SharedState, ValidatorPool};
pub use probe::{HttpProbe, Probe, Verdict};
