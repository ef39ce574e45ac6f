//! # Configuration Tests
//!
//! Tests for cache geometry defaults, JSON deserialization, derived sizes,
//! and validation.

use std::io::Write;

use cachesim_core::SimError;
use cachesim_core::config::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_config_default() {
    let config = CacheConfig::default();
    assert_eq!(config.set_bits, 1);
    assert_eq!(config.lines_per_set, 1);
    assert_eq!(config.block_bits, 1);
    assert_eq!(config.policy, ReplacementPolicy::Lru);
    assert!(config.validate().is_ok());
}

#[test]
fn test_new_uses_lru() {
    assert_eq!(CacheConfig::new(4, 2, 4).policy, ReplacementPolicy::Lru);
    assert_eq!(
        CacheConfig::new(4, 2, 4).with_policy(ReplacementPolicy::Fifo).policy,
        ReplacementPolicy::Fifo
    );
}

#[test]
fn test_derived_sizes() {
    let config = CacheConfig::new(4, 2, 4);
    assert_eq!(config.num_sets(), 16);
    assert_eq!(config.total_lines(), Some(32));
    assert_eq!(config.block_size(), 16);
    assert_eq!(config.capacity_bytes(), 512);
}

#[test]
fn test_degenerate_geometry() {
    let config = CacheConfig::new(0, 1, 0);
    assert!(config.validate().is_ok());
    assert_eq!(config.num_sets(), 1);
    assert_eq!(config.block_size(), 1);
    assert_eq!(config.capacity_bytes(), 1);
}

#[test]
fn test_full_width_blocks() {
    let config = CacheConfig::new(0, 2, 64);
    assert!(config.validate().is_ok());
    assert_eq!(config.block_size(), u64::MAX);
    assert_eq!(config.capacity_bytes(), u64::MAX);
}

// ── JSON ─────────────────────────────────────────────────

#[test]
fn test_json_full() {
    let json = r#"{
        "set_bits": 5,
        "lines_per_set": 1,
        "block_bits": 5,
        "policy": "FIFO"
    }"#;
    let config = CacheConfig::from_json(json).unwrap();
    assert_eq!(
        config,
        CacheConfig::new(5, 1, 5).with_policy(ReplacementPolicy::Fifo)
    );
}

#[test]
fn test_json_partial_uses_defaults() {
    let config = CacheConfig::from_json(r#"{ "lines_per_set": 4 }"#).unwrap();
    assert_eq!(config, CacheConfig::new(1, 4, 1));

    let empty = CacheConfig::from_json("{}").unwrap();
    assert_eq!(empty, CacheConfig::default());
}

#[rstest]
#[case("LRU", ReplacementPolicy::Lru)]
#[case("Lru", ReplacementPolicy::Lru)]
#[case("lru", ReplacementPolicy::Lru)]
#[case("FIFO", ReplacementPolicy::Fifo)]
#[case("Fifo", ReplacementPolicy::Fifo)]
#[case("fifo", ReplacementPolicy::Fifo)]
fn test_policy_spellings(#[case] name: &str, #[case] expected: ReplacementPolicy) {
    let json = format!(r#"{{ "policy": "{name}" }}"#);
    assert_eq!(CacheConfig::from_json(&json).unwrap().policy, expected);
}

#[rstest]
#[case::unknown_policy(r#"{ "policy": "RANDOM" }"#)]
#[case::unknown_field(r#"{ "sets": 4 }"#)]
#[case::negative_bits(r#"{ "set_bits": -1 }"#)]
#[case::not_json("s=4 E=1 b=4")]
fn test_json_format_errors(#[case] json: &str) {
    assert!(matches!(
        CacheConfig::from_json(json),
        Err(SimError::ConfigFormat(_))
    ));
}

#[test]
fn test_json_is_validated() {
    assert!(matches!(
        CacheConfig::from_json(r#"{ "lines_per_set": 0 }"#),
        Err(SimError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"{{ "set_bits": 2, "lines_per_set": 4, "block_bits": 3 }}"#).unwrap();

    let config = CacheConfig::from_file(file.path()).unwrap();
    assert_eq!(config, CacheConfig::new(2, 4, 3));
}

#[test]
fn test_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        CacheConfig::from_file(dir.path().join("absent.json")),
        Err(SimError::Io(_))
    ));
}

// ── Validation ───────────────────────────────────────────

#[rstest]
#[case::zero_lines(CacheConfig::new(1, 0, 1), "lines per set")]
#[case::address_overflow(CacheConfig::new(40, 1, 30), "64-bit")]
#[case::too_many_sets(CacheConfig::new(MAX_SET_BITS + 1, 1, 0), "supported maximum")]
#[case::line_count_overflow(CacheConfig::new(MAX_SET_BITS, usize::MAX, 0), "overflow")]
fn test_validate_rejects(#[case] config: CacheConfig, #[case] message: &str) {
    match config.validate() {
        Err(e @ SimError::InvalidConfiguration(_)) => {
            assert!(e.is_contract_violation());
            assert!(e.to_string().contains(message), "{e}");
        }
        other => panic!("expected InvalidConfiguration, got {other:?}"),
    }
}

#[rstest]
#[case(CacheConfig::new(MAX_SET_BITS, 1, 0))]
#[case(CacheConfig::new(0, 1, 64))]
#[case(CacheConfig::new(16, 8, 48))]
fn test_validate_accepts_boundaries(#[case] config: CacheConfig) {
    assert!(config.validate().is_ok());
}
