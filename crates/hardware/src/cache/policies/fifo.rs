//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts the oldest cache line in a set, regardless of how recently
//! it was accessed. Each fill stamps the line with `filled_at`; hits leave that
//! stamp alone, so the victim is the line that entered the set first.
//!
//! # Performance
//!
//! - **Time Complexity:** `victim()` is O(W) where W is the associativity
//! - **Best Case:** Streaming accesses where all lines have equal importance
//! - **Worst Case:** Workloads with strong temporal locality (may evict frequently-used lines)

use super::{ReplacementPolicy, oldest_by};
use crate::cache::CacheLine;

/// FIFO policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct FifoPolicy;

impl ReplacementPolicy for FifoPolicy {
    /// Returns the way with the smallest `filled_at` stamp.
    fn victim(&self, lines: &[CacheLine]) -> usize {
        oldest_by(lines, CacheLine::filled_at)
    }
}
