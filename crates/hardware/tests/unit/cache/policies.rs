//! Cache Replacement Policy Tests.
//!
//! Verifies victim selection for the LRU and FIFO policies, both in isolation
//! on raw lines and through the cache model where hits and fills stamp the
//! lines with sequence numbers.

use cachesim_core::cache::policies::{self, FifoPolicy, LruPolicy, ReplacementPolicy};
use cachesim_core::cache::{AccessOutcome, CacheLine, CacheModel};
use cachesim_core::config::{CacheConfig, ReplacementPolicy as PolicyType};
use rstest::rstest;

use crate::common::{fifo, lru};

// ══════════════════════════════════════════════════════════
// 1. Tie-breaking on untouched lines
// ══════════════════════════════════════════════════════════

/// Lines that share a stamp resolve to the lowest way.
#[rstest]
#[case::lru(&LruPolicy as &dyn ReplacementPolicy)]
#[case::fifo(&FifoPolicy as &dyn ReplacementPolicy)]
fn identical_lines_evict_way_zero(#[case] policy: &dyn ReplacementPolicy) {
    let lines = [CacheLine::default(); 4];
    assert_eq!(policy.victim(&lines), 0);
    assert_eq!(policy.victim(&lines[..1]), 0);
}

#[test]
fn build_selects_the_configured_policy() {
    assert!(format!("{:?}", policies::build(PolicyType::Lru)).contains("Lru"));
    assert!(format!("{:?}", policies::build(PolicyType::Fifo)).contains("Fifo"));
}

// ══════════════════════════════════════════════════════════
// 2. LRU vs FIFO through the cache model
// ══════════════════════════════════════════════════════════

/// Fill A and B, hit A, then miss on C.
/// LRU keeps A (recently hit) and drops B; FIFO drops A (filled first).
#[rstest]
#[case::lru(lru(0, 2, 0), 0xB, 0xA)]
#[case::fifo(fifo(0, 2, 0), 0xA, 0xB)]
fn hit_after_fill_separates_the_policies(
    #[case] config: CacheConfig,
    #[case] evicted: u64,
    #[case] kept: u64,
) {
    let mut cache = CacheModel::new(&config).unwrap();
    assert_eq!(cache.apply(0, 0xA, 0).unwrap(), AccessOutcome::Miss);
    assert_eq!(cache.apply(0, 0xB, 1).unwrap(), AccessOutcome::Miss);
    assert_eq!(cache.apply(0, 0xA, 2).unwrap(), AccessOutcome::Hit);
    assert_eq!(cache.apply(0, 0xC, 3).unwrap(), AccessOutcome::MissWithEviction);

    assert!(!cache.contains(0, evicted));
    assert!(cache.contains(0, kept));
    assert!(cache.contains(0, 0xC));
}

/// Without intervening hits the two policies evict in the same order.
#[rstest]
#[case::lru(lru(0, 3, 0))]
#[case::fifo(fifo(0, 3, 0))]
fn streaming_evicts_in_fill_order(#[case] config: CacheConfig) {
    let mut cache = CacheModel::new(&config).unwrap();
    for tag in 0..3 {
        assert_eq!(cache.apply(0, tag, tag).unwrap(), AccessOutcome::Miss);
    }
    for tag in 3..9 {
        assert_eq!(
            cache.apply(0, tag, tag).unwrap(),
            AccessOutcome::MissWithEviction
        );
        assert!(!cache.contains(0, tag - 3), "oldest block {} evicted", tag - 3);
    }
}

/// A cyclic scan one block larger than the set defeats LRU completely.
#[test]
fn lru_thrashes_on_cyclic_scan() {
    let mut cache = CacheModel::new(&lru(0, 4, 0)).unwrap();
    let mut seq = 0;
    for _ in 0..5 {
        for tag in 0..5 {
            let _ = cache.apply(0, tag, seq).unwrap();
            seq += 1;
        }
    }
    assert_eq!(cache.hits(), 0);
    assert_eq!(cache.misses(), 25);
    assert_eq!(cache.evictions(), 21);
}

/// Repeated hits on one block never protect it under FIFO.
#[test]
fn fifo_ignores_hits() {
    let mut cache = CacheModel::new(&fifo(0, 2, 0)).unwrap();
    assert_eq!(cache.apply(0, 1, 0).unwrap(), AccessOutcome::Miss);
    assert_eq!(cache.apply(0, 2, 1).unwrap(), AccessOutcome::Miss);
    for seq in 2..10 {
        assert_eq!(cache.apply(0, 1, seq).unwrap(), AccessOutcome::Hit);
    }
    assert_eq!(cache.apply(0, 3, 10).unwrap(), AccessOutcome::MissWithEviction);
    assert!(!cache.contains(0, 1));
    assert!(cache.contains(0, 2));
}
