//! Simulator error definitions.
//!
//! This module defines the single error type surfaced by the simulator. It covers:
//! 1. **Configuration errors:** Cache geometries that cannot be built.
//! 2. **Access errors:** Decoded accesses that violate the cache contract.
//! 3. **Trace errors:** Data lines that cannot be tokenised.
//! 4. **I/O and format errors:** Failures reading traces or JSON configuration.
//!
//! None of these are recoverable inside the simulator. The first error aborts
//! the run and the counters of a failed run must be treated as undefined.

use thiserror::Error;

/// Errors produced while configuring the cache or replaying a trace.
#[derive(Debug, Error)]
pub enum SimError {
    /// The `(s, E, b)` geometry is unusable.
    ///
    /// Raised at construction time, before any access is processed.
    #[error("invalid cache configuration: {0}")]
    InvalidConfiguration(String),

    /// A decoded set index does not address any set of the cache.
    ///
    /// This indicates a decoder/configuration mismatch in the caller rather
    /// than bad trace data.
    #[error("invalid access: set index {set_index} is outside 0..{num_sets}")]
    InvalidAccess {
        /// The offending set index.
        set_index: u64,
        /// Number of sets the cache was built with.
        num_sets: u64,
    },

    /// A data line carried an access kind other than `L`, `S` or `M`.
    #[error("invalid access: unrecognized access kind `{0}`")]
    UnknownAccessKind(String),

    /// A trace line could not be tokenised.
    #[error("malformed trace line {line}: {reason}")]
    MalformedTrace {
        /// 1-based line number, or 0 when parsing a detached record.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// Reading a trace or configuration file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A JSON configuration did not deserialize.
    #[error("configuration format: {0}")]
    ConfigFormat(#[from] serde_json::Error),
}

impl SimError {
    /// Returns `true` for errors that indicate a programming-contract
    /// violation (bad geometry or out-of-range access) rather than bad input.
    pub const fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfiguration(_) | Self::InvalidAccess { .. }
        )
    }

    /// Attaches a line number to a [`SimError::MalformedTrace`] raised while
    /// parsing a detached record; other variants pass through untouched.
    #[must_use]
    pub fn at_line(self, line_no: usize) -> Self {
        match self {
            Self::MalformedTrace { reason, .. } => Self::MalformedTrace {
                line: line_no,
                reason,
            },
            other => other,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimError>;
