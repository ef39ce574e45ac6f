//! Trace-driven set-associative cache simulator library.
//!
//! This crate replays a memory-access trace against a configurable cache and
//! reports aggregate hit, miss and eviction counts. It consists of:
//! 1. **Common:** Address decoding, access kinds, and the error type.
//! 2. **Cache:** Set-associative storage, replacement policies, and accounting.
//! 3. **Configuration:** Cache geometry `(s, E, b)` and policy selection.
//! 4. **Simulation:** Trace reading and in-order replay.
//! 5. **Statistics:** Counter snapshots and reporting.
//!
//! # Examples
//!
//! ```
//! use cachesim_core::{CacheConfig, sim};
//!
//! // With s = 1 and b = 1, addresses 0x0 and 0x4 share set 0 under different tags.
//! let trace = " L 0,1\n L 4,1\n L 0,1\n";
//! let stats = sim::simulate(&CacheConfig::new(1, 1, 1), trace.as_bytes()).unwrap();
//! assert_eq!((stats.hits, stats.misses, stats.evictions), (0, 3, 2));
//! ```

/// Set-associative cache model and replacement policies.
pub mod cache;
/// Common types (address decoding, access kinds, errors).
pub mod common;
/// Cache configuration (defaults, policy enum, validation).
pub mod config;
/// Trace reading and replay.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Cache storage and accounting; construct with `CacheModel::new`.
pub use crate::cache::CacheModel;
/// Crate-wide error type and result alias.
pub use crate::common::{Result, SimError};
/// Cache geometry; use `CacheConfig::new` or deserialize from JSON.
pub use crate::config::CacheConfig;
/// Trace replay driver; construct with `Simulator::new`.
pub use crate::sim::Simulator;
/// Counter snapshot returned by a run.
pub use crate::stats::CacheStats;
