//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the cache line that has not been accessed for the longest time.
//! Every hit or fill stamps the line with the access's sequence number, so the
//! victim is simply the line with the smallest `last_used` stamp. Ties can only
//! occur between lines that were never touched since the cache was created and
//! are broken by the lowest way.
//!
//! # Performance
//!
//! - **Time Complexity:** `victim()` is O(W) where W is the associativity
//! - **Space Complexity:** one `u64` stamp per line
//! - **Best Case:** Workloads with good temporal locality
//! - **Worst Case:** Cyclic scans slightly larger than the set (thrashing)

use super::{ReplacementPolicy, oldest_by};
use crate::cache::CacheLine;

/// LRU policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct LruPolicy;

impl ReplacementPolicy for LruPolicy {
    /// Returns the way with the smallest `last_used` stamp.
    fn victim(&self, lines: &[CacheLine]) -> usize {
        oldest_by(lines, CacheLine::last_used)
    }
}
