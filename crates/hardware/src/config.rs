//! Configuration system for the cache simulator.
//!
//! This module defines the cache geometry and policy selection. It provides:
//! 1. **Defaults:** Baseline parameters matching the classic `csim` flags.
//! 2. **Structures:** The `CacheConfig` consumed by the simulator.
//! 3. **Enums:** Replacement policy selection.
//! 4. **Validation:** Rejection of geometries that cannot be simulated.
//!
//! Configuration is supplied from command-line flags, from JSON, or via
//! `CacheConfig::default()`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::{Result, SimError};

/// Default configuration constants for the simulator.
mod defaults {
    /// Default number of set-index bits (2 sets).
    pub const SET_BITS: u32 = 1;

    /// Default number of lines per set (direct-mapped).
    pub const LINES_PER_SET: usize = 1;

    /// Default number of block-offset bits (2-byte blocks).
    pub const BLOCK_BITS: u32 = 1;
}

/// Largest accepted set-index width.
///
/// The cache allocates every set up front, so the set count has to fit in
/// host memory long before it stops fitting in a `u64`.
pub const MAX_SET_BITS: u32 = 31;

/// Cache replacement policy algorithms.
///
/// Specifies the algorithm used to select which cache line to evict
/// when a new line must be installed in a full cache set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the line whose last hit or fill is oldest.
    #[default]
    #[serde(alias = "Lru", alias = "lru")]
    Lru,
    /// First In First Out replacement policy.
    ///
    /// Evicts the line that was filled first, ignoring hits.
    #[serde(alias = "Fifo", alias = "fifo")]
    Fifo,
}

/// Cache geometry and policy.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{CacheConfig, ReplacementPolicy};
///
/// let json = r#"{ "set_bits": 4, "lines_per_set": 2, "block_bits": 4 }"#;
/// let config = CacheConfig::from_json(json).unwrap();
/// assert_eq!(config.num_sets(), 16);
/// assert_eq!(config.block_size(), 16);
/// assert_eq!(config.policy, ReplacementPolicy::Lru);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Number of set-index bits (`s`); the cache has `2^s` sets.
    #[serde(default = "CacheConfig::default_set_bits")]
    pub set_bits: u32,

    /// Associativity (`E`), the number of lines in every set.
    #[serde(default = "CacheConfig::default_lines_per_set")]
    pub lines_per_set: usize,

    /// Number of block-offset bits (`b`); blocks are `2^b` bytes.
    #[serde(default = "CacheConfig::default_block_bits")]
    pub block_bits: u32,

    /// Replacement policy
    #[serde(default)]
    pub policy: ReplacementPolicy,
}

impl CacheConfig {
    fn default_set_bits() -> u32 {
        defaults::SET_BITS
    }

    fn default_lines_per_set() -> usize {
        defaults::LINES_PER_SET
    }

    fn default_block_bits() -> u32 {
        defaults::BLOCK_BITS
    }

    /// Creates a configuration with the LRU policy.
    ///
    /// The result is not validated; see [`CacheConfig::validate`].
    pub const fn new(set_bits: u32, lines_per_set: usize, block_bits: u32) -> Self {
        Self {
            set_bits,
            lines_per_set,
            block_bits,
            policy: ReplacementPolicy::Lru,
        }
    }

    /// Returns a copy of this configuration using `policy`.
    #[must_use]
    pub const fn with_policy(mut self, policy: ReplacementPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Parses a configuration from a JSON document.
    ///
    /// Missing fields take their defaults. The result is validated.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ConfigFormat`] for malformed JSON and
    /// [`SimError::InvalidConfiguration`] for an unusable geometry.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the file cannot be read, otherwise the
    /// errors of [`CacheConfig::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Checks that the geometry can be simulated.
    ///
    /// `s = 0` and `b = 0` are valid (one set, one-byte blocks). Rejected:
    /// zero lines per set, `s + b > 64`, more than [`MAX_SET_BITS`] set bits,
    /// and geometries whose line count overflows `usize`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] describing the first
    /// violated constraint.
    pub fn validate(&self) -> Result<()> {
        if self.lines_per_set == 0 {
            return Err(SimError::InvalidConfiguration(
                "lines per set (E) must be at least 1".into(),
            ));
        }
        if self.set_bits.saturating_add(self.block_bits) > u64::BITS {
            return Err(SimError::InvalidConfiguration(format!(
                "set bits ({}) + block bits ({}) exceed the 64-bit address width",
                self.set_bits, self.block_bits
            )));
        }
        if self.set_bits > MAX_SET_BITS {
            return Err(SimError::InvalidConfiguration(format!(
                "set bits ({}) exceed the supported maximum of {MAX_SET_BITS}",
                self.set_bits
            )));
        }
        if self.total_lines().is_none() {
            return Err(SimError::InvalidConfiguration(format!(
                "{} sets of {} lines overflow the host address space",
                self.num_sets(),
                self.lines_per_set
            )));
        }
        Ok(())
    }

    /// Number of sets (`2^s`), or 0 when `s` does not fit in `usize`.
    pub const fn num_sets(&self) -> usize {
        match 1usize.checked_shl(self.set_bits) {
            Some(sets) => sets,
            None => 0,
        }
    }

    /// Total number of lines across all sets, or `None` on overflow.
    pub const fn total_lines(&self) -> Option<usize> {
        match 1usize.checked_shl(self.set_bits) {
            Some(sets) => sets.checked_mul(self.lines_per_set),
            None => None,
        }
    }

    /// Block size in bytes (`2^b`), saturating at `u64::MAX` for `b = 64`.
    pub const fn block_size(&self) -> u64 {
        if self.block_bits >= u64::BITS {
            u64::MAX
        } else {
            1u64 << self.block_bits
        }
    }

    /// Data capacity in bytes (`2^s * E * 2^b`), saturating on overflow.
    pub const fn capacity_bytes(&self) -> u64 {
        (self.num_sets() as u64)
            .saturating_mul(self.lines_per_set as u64)
            .saturating_mul(self.block_size())
    }
}

impl Default for CacheConfig {
    /// Creates the default configuration: `s = 1`, `E = 1`, `b = 1`, LRU.
    fn default() -> Self {
        Self::new(
            defaults::SET_BITS,
            defaults::LINES_PER_SET,
            defaults::BLOCK_BITS,
        )
    }
}
