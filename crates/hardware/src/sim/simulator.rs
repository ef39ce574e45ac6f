//! Simulator: owns the cache model, the address layout and the sequence counter.
//!
//! Trace records are decoded into set index and tag, stamped with the next
//! sequence number and recorded in order. The counter advances by one per
//! load or store and by two per modify.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use tracing::info;

use super::trace::{TraceReader, TraceRecord};
use crate::cache::{AccessRecord, CacheModel, RecordOutcome};
use crate::common::{AddressLayout, Result, SimError};
use crate::config::CacheConfig;
use crate::stats::CacheStats;

/// Top-level trace-driven simulator.
#[derive(Debug)]
pub struct Simulator {
    config: CacheConfig,
    layout: AddressLayout,
    cache: CacheModel,
    sequence: u64,
}

impl Simulator {
    /// Creates a simulator with an empty cache.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] for an unusable geometry.
    pub fn new(config: &CacheConfig) -> Result<Self> {
        let cache = CacheModel::new(config)?;
        info!(
            sets = cache.num_sets(),
            ways = cache.ways(),
            block_bytes = config.block_size(),
            policy = ?config.policy,
            "cache configured"
        );
        Ok(Self {
            config: config.clone(),
            layout: AddressLayout::new(config.set_bits, config.block_bits),
            cache,
            sequence: 0,
        })
    }

    /// The configuration the simulator was built with.
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// The address layout derived from the configuration.
    pub const fn layout(&self) -> AddressLayout {
        self.layout
    }

    /// The cache model.
    pub const fn cache(&self) -> &CacheModel {
        &self.cache
    }

    /// Sequence number the next record will receive.
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Current counters.
    pub const fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Decodes a trace record into a cache access stamped with the next
    /// sequence number. Does not advance the counter.
    pub const fn decode(&self, record: &TraceRecord) -> AccessRecord {
        let fields = self.layout.decode(record.address);
        AccessRecord {
            kind: record.kind,
            tag: fields.tag,
            set_index: fields.set_index,
            sequence: self.sequence,
        }
    }

    /// Applies one trace record.
    ///
    /// # Errors
    ///
    /// Propagates [`SimError::InvalidAccess`] from the cache model.
    pub fn step(&mut self, record: &TraceRecord) -> Result<RecordOutcome> {
        let access = self.decode(record);
        let outcome = self.cache.record(&access)?;
        self.sequence = self.sequence.saturating_add(record.kind.applications());
        Ok(outcome)
    }

    /// Replays a whole trace and returns the final counters.
    ///
    /// # Errors
    ///
    /// Stops at the first trace, I/O or access error.
    pub fn run<R: BufRead>(&mut self, reader: R) -> Result<CacheStats> {
        self.replay(reader, |_, _| Ok(()))
    }

    /// Replays a whole trace, writing one line per record to `out`:
    /// the record followed by its outcomes, e.g. `M 20,1 miss hit`.
    ///
    /// # Errors
    ///
    /// Stops at the first trace, I/O or access error, including write
    /// failures on `out`.
    pub fn run_verbose<R: BufRead, W: Write>(
        &mut self,
        reader: R,
        out: &mut W,
    ) -> Result<CacheStats> {
        self.replay(reader, |record, outcome| {
            writeln!(out, "{record} {outcome}").map_err(SimError::from)
        })
    }

    /// Opens `path` and replays it.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the file cannot be opened, otherwise the
    /// errors of [`Simulator::run`].
    pub fn run_file(&mut self, path: impl AsRef<Path>) -> Result<CacheStats> {
        let path = path.as_ref();
        info!(trace = %path.display(), "replaying trace");
        let file = File::open(path)?;
        self.run(BufReader::new(file))
    }

    fn replay<R, F>(&mut self, reader: R, mut on_record: F) -> Result<CacheStats>
    where
        R: BufRead,
        F: FnMut(&TraceRecord, &RecordOutcome) -> Result<()>,
    {
        let mut records = 0u64;
        for record in TraceReader::new(reader) {
            let record = record?;
            let outcome = self.step(&record)?;
            on_record(&record, &outcome)?;
            records += 1;
        }

        let stats = self.stats();
        info!(
            records,
            hits = stats.hits,
            misses = stats.misses,
            evictions = stats.evictions,
            "trace replayed"
        );
        Ok(stats)
    }
}
