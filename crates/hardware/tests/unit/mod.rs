//! # Unit Components
//!
//! Tests for each building block of the simulator, from address decoding up
//! to whole-trace replay.


/// Unit tests for the cache model and its replacement policies.
///
/// This module covers hit/miss/eviction accounting, modify handling,
/// policy victim selection and randomized invariants.
pub mod cache;

/// Unit tests for configuration defaults, JSON loading and validation.
pub mod config;
