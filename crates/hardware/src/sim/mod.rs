//! Trace replay.
//!
//! Provides the trace reader and the simulator that drives the cache model
//! with decoded records in trace order.

/// Trace-driven simulator (decoding, sequencing, replay).
pub mod simulator;
/// Trace line tokenising and iteration.
pub mod trace;

pub use simulator::Simulator;
pub use trace::{TraceReader, TraceRecord, parse_line};

use std::io::BufRead;

use crate::common::Result;
use crate::config::CacheConfig;
use crate::stats::CacheStats;

/// Builds a simulator for `config` and replays `reader` through it.
///
/// # Errors
///
/// Returns the first configuration, trace, I/O or access error.
pub fn simulate<R: BufRead>(config: &CacheConfig, reader: R) -> Result<CacheStats> {
    Simulator::new(config)?.run(reader)
}
