//! Cache Replacement Policies.
//!
//! Implements the algorithms that pick a victim line in a full set.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used (default).
//! - `Fifo`: First-In, First-Out.
//!
//! Policies are stateless: all the history they need (`last_used`,
//! `filled_at`) lives in the lines themselves, stamped with the caller's
//! sequence numbers.

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Recently Used replacement policy.
pub mod lru;

pub use fifo::FifoPolicy;
pub use lru::LruPolicy;

use super::CacheLine;
use crate::config::ReplacementPolicy as PolicyType;

/// Trait for cache replacement policies.
pub trait ReplacementPolicy: Send + Sync + std::fmt::Debug {
    /// Selects the way to evict from a full set.
    ///
    /// # Arguments
    ///
    /// * `lines` - Every line of the set, all of them occupied. Never empty.
    ///
    /// # Returns
    ///
    /// The index of the way to evict.
    fn victim(&self, lines: &[CacheLine]) -> usize;
}

/// Returns the position of the smallest key, preferring the lowest position
/// on ties. Returns 0 for an empty slice.
pub(crate) fn oldest_by<F>(lines: &[CacheLine], key: F) -> usize
where
    F: Fn(&CacheLine) -> u64,
{
    let mut victim = 0;
    let mut oldest = u64::MAX;
    for (way, line) in lines.iter().enumerate() {
        let k = key(line);
        if k < oldest {
            victim = way;
            oldest = k;
        }
    }
    victim
}

/// Builds the policy object selected by the configuration.
pub fn build(policy: PolicyType) -> Box<dyn ReplacementPolicy> {
    match policy {
        PolicyType::Lru => Box::new(LruPolicy),
        PolicyType::Fifo => Box::new(FifoPolicy),
    }
}
