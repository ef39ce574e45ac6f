//! Simulation statistics collection and reporting.
//!
//! This module holds the aggregate counters produced by a run. It provides:
//! 1. **Counters:** Hits, misses, and evictions.
//! 2. **Derived metrics:** Total accesses, hit rate, and miss rate.
//! 3. **Reporting:** The one-line summary and a sectioned banner report.

use std::fmt;
use std::io::{self, Write};

use serde::Serialize;

/// Aggregate counters of a simulation run.
///
/// Each applied access is exactly one hit or one miss, so
/// `hits + misses` equals the number of applications (a modify counts twice).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Accesses that found their block resident.
    pub hits: u64,
    /// Accesses that did not find their block resident.
    pub misses: u64,
    /// Misses that replaced a resident block.
    pub evictions: u64,
}

impl CacheStats {
    /// Total number of applied accesses.
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit, or 0 when nothing was accessed.
    pub fn hit_rate(&self) -> f64 {
        match self.accesses() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }

    /// Fraction of accesses that missed, or 0 when nothing was accessed.
    pub fn miss_rate(&self) -> f64 {
        match self.accesses() {
            0 => 0.0,
            total => self.misses as f64 / total as f64,
        }
    }

    /// Writes the banner report to `out`.
    ///
    /// # Errors
    ///
    /// Propagates write failures from `out`.
    pub fn write_report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "==========================================================")?;
        writeln!(out, "CACHE SIMULATION STATISTICS")?;
        writeln!(out, "==========================================================")?;
        writeln!(out, "cache.accesses           {}", self.accesses())?;
        writeln!(out, "cache.hits               {}", self.hits)?;
        writeln!(out, "cache.misses             {}", self.misses)?;
        writeln!(out, "cache.evictions          {}", self.evictions)?;
        writeln!(out, "----------------------------------------------------------")?;
        writeln!(out, "cache.hit_rate           {:.2}%", self.hit_rate() * 100.0)?;
        writeln!(out, "cache.miss_rate          {:.2}%", self.miss_rate() * 100.0)?;
        writeln!(out, "==========================================================")
    }

    /// Prints the banner report to stdout.
    ///
    /// # Errors
    ///
    /// Propagates write failures on stdout.
    pub fn print(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.write_report(&mut lock)
    }
}

impl fmt::Display for CacheStats {
    /// Formats the one-line summary: `Hits: H  Misses: M  Evictions: E`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hits: {}  Misses: {}  Evictions: {}",
            self.hits, self.misses, self.evictions
        )
    }
}
