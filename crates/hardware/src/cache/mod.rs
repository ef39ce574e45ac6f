//! Set-Associative Cache Model.
//!
//! This module implements the storage and accounting of a set-associative
//! cache. It supports the following:
//! 1. **Lookup:** Hit detection by tag within the addressed set.
//! 2. **Fill:** Installing a missing block in the first empty line.
//! 3. **Eviction:** Replacing a victim chosen by the configured policy.
//! 4. **Accounting:** Running hit, miss, and eviction totals.
//!
//! Recency is never global state: every operation takes the sequence number
//! of the access, supplied by the caller in trace order.

/// Cache replacement policy implementations (LRU, FIFO).
pub mod policies;

use std::fmt;

use tracing::{debug, trace};

use self::policies::ReplacementPolicy;
use crate::common::{AccessKind, Result, SimError};
use crate::config::CacheConfig;
use crate::stats::CacheStats;

/// One line (way) of a set.
///
/// A line is either empty or holds a block identified by its tag together
/// with the sequence stamps used by the replacement policies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    tag: u64,
    valid: bool,
    last_used: u64,
    filled_at: u64,
}

impl CacheLine {
    const fn filled(tag: u64, sequence: u64) -> Self {
        Self {
            tag,
            valid: true,
            last_used: sequence,
            filled_at: sequence,
        }
    }

    /// Returns `true` if the line holds a block.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// The resident tag, or `None` for an empty line.
    #[inline]
    pub const fn tag(&self) -> Option<u64> {
        if self.valid { Some(self.tag) } else { None }
    }

    /// Sequence number of the most recent hit or fill.
    #[inline]
    pub const fn last_used(&self) -> u64 {
        self.last_used
    }

    /// Sequence number of the fill that installed the resident block.
    #[inline]
    pub const fn filled_at(&self) -> u64 {
        self.filled_at
    }

    #[inline]
    const fn holds(&self, tag: u64) -> bool {
        self.valid && self.tag == tag
    }
}

/// Result of applying one access to the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessOutcome {
    /// The block was resident.
    Hit,
    /// The block was installed in an empty line.
    Miss,
    /// The block replaced a victim line.
    MissWithEviction,
}

impl AccessOutcome {
    /// Returns `true` for [`AccessOutcome::Hit`].
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }

    /// Returns `true` if a resident block was evicted.
    pub const fn evicted(self) -> bool {
        matches!(self, Self::MissWithEviction)
    }
}

impl fmt::Display for AccessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
            Self::MissWithEviction => "miss eviction",
        })
    }
}

/// One decoded access, ready to be recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessRecord {
    /// Load, store or modify.
    pub kind: AccessKind,
    /// Address bits above the set-index field.
    pub tag: u64,
    /// Set the access falls into.
    pub set_index: u64,
    /// Trace-order stamp. A modify also consumes `sequence + 1`.
    pub sequence: u64,
}

/// Outcomes of a recorded access: one for loads and stores, two for modifies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordOutcome {
    /// Outcome of the first (or only) application.
    pub first: AccessOutcome,
    /// Outcome of the write half of a modify.
    pub second: Option<AccessOutcome>,
}

impl RecordOutcome {
    /// Iterates over the applied outcomes in order.
    pub fn iter(&self) -> impl Iterator<Item = AccessOutcome> {
        std::iter::once(self.first).chain(self.second)
    }
}

impl fmt::Display for RecordOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first)?;
        if let Some(second) = self.second {
            write!(f, " {second}")?;
        }
        Ok(())
    }
}

/// Set-associative cache with `2^s` sets of `E` lines.
///
/// Lines are stored in one flat arena; set `i` occupies
/// `lines[i * ways .. (i + 1) * ways]`. The arena never grows after
/// construction and every set starts with `E` empty lines.
#[derive(Debug)]
pub struct CacheModel {
    lines: Vec<CacheLine>,
    num_sets: usize,
    ways: usize,
    policy: Box<dyn ReplacementPolicy>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl CacheModel {
    /// Creates an empty cache for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if the configuration does
    /// not validate or its line arena cannot be allocated.
    pub fn new(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        let total = config.total_lines().ok_or_else(|| {
            SimError::InvalidConfiguration("line count overflows usize".into())
        })?;

        let mut lines = Vec::new();
        lines.try_reserve_exact(total).map_err(|e| {
            SimError::InvalidConfiguration(format!("cannot allocate {total} cache lines: {e}"))
        })?;
        lines.resize(total, CacheLine::default());

        Ok(Self {
            lines,
            num_sets: config.num_sets(),
            ways: config.lines_per_set,
            policy: policies::build(config.policy),
            hits: 0,
            misses: 0,
            evictions: 0,
        })
    }

    /// Maps a set index to the start of its lines in the arena.
    fn set_base(&self, set_index: u64) -> Result<usize> {
        usize::try_from(set_index)
            .ok()
            .filter(|&index| index < self.num_sets)
            .map(|index| index * self.ways)
            .ok_or(SimError::InvalidAccess {
                set_index,
                num_sets: self.num_sets as u64,
            })
    }

    /// Applies one logical access to the set at `set_index`.
    ///
    /// A resident tag is a hit and refreshes the line's `last_used` stamp.
    /// Otherwise the access misses and fills the first empty line, or, when
    /// the set is full, replaces the policy's victim.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidAccess`] if `set_index` is not below the
    /// set count. No state is changed in that case.
    pub fn apply(&mut self, set_index: u64, tag: u64, sequence: u64) -> Result<AccessOutcome> {
        let base = self.set_base(set_index)?;
        let set = &mut self.lines[base..base + self.ways];

        if let Some(line) = set.iter_mut().find(|line| line.holds(tag)) {
            line.last_used = sequence;
            self.hits += 1;
            trace!(set_index, tag, sequence, "hit");
            return Ok(AccessOutcome::Hit);
        }

        self.misses += 1;

        if let Some(line) = set.iter_mut().find(|line| !line.valid) {
            *line = CacheLine::filled(tag, sequence);
            trace!(set_index, tag, sequence, "miss");
            return Ok(AccessOutcome::Miss);
        }

        let way = self.policy.victim(set);
        debug!(
            set_index,
            way,
            victim = set[way].tag,
            tag,
            sequence,
            "miss eviction"
        );
        set[way] = CacheLine::filled(tag, sequence);
        self.evictions += 1;
        Ok(AccessOutcome::MissWithEviction)
    }

    /// Records one trace access.
    ///
    /// Loads and stores apply once. A modify applies twice to the same block:
    /// the read half with `sequence`, the write half with `sequence + 1`. The
    /// write half always hits because the read half left the block resident.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidAccess`] if the set index is out of range,
    /// before either half of a modify is applied.
    pub fn record(&mut self, access: &AccessRecord) -> Result<RecordOutcome> {
        let first = self.apply(access.set_index, access.tag, access.sequence)?;
        let second = match access.kind {
            AccessKind::Load | AccessKind::Store => None,
            AccessKind::Modify => Some(self.apply(
                access.set_index,
                access.tag,
                access.sequence.saturating_add(1),
            )?),
        };
        Ok(RecordOutcome { first, second })
    }

    /// Returns `true` if the block `(set_index, tag)` is resident.
    pub fn contains(&self, set_index: u64, tag: u64) -> bool {
        self.set(set_index)
            .is_some_and(|lines| lines.iter().any(|line| line.holds(tag)))
    }

    /// The lines of one set, or `None` if `set_index` is out of range.
    pub fn set(&self, set_index: u64) -> Option<&[CacheLine]> {
        let base = self.set_base(set_index).ok()?;
        Some(&self.lines[base..base + self.ways])
    }

    /// Number of sets (`2^s`).
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Number of lines per set (`E`).
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Number of accesses that found their block resident.
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of accesses that did not find their block resident.
    pub const fn misses(&self) -> u64 {
        self.misses
    }

    /// Number of misses that replaced a resident block.
    pub const fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Snapshot of the running totals.
    pub const fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
        }
    }
}
