//! Memory Access Kinds.
//!
//! This module defines the classification of data accesses found in a trace.
//! These types are used for the following:
//! 1. **Accounting:** Deciding how many times an access is applied to the cache.
//! 2. **Trace Parsing:** Mapping the single-letter trace tokens to a closed set.
//! 3. **Reporting:** Echoing the trace token in verbose output.

use std::fmt;
use std::str::FromStr;

use super::error::SimError;

/// Kind of data access recorded in a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// Data load (`L`).
    Load,

    /// Data store (`S`).
    Store,

    /// Data modify (`M`).
    ///
    /// A load immediately followed by a store to the same address. It is
    /// applied to the cache as two independent accesses.
    Modify,
}

impl AccessKind {
    /// Number of cache applications this kind of access performs.
    ///
    /// Callers that own the sequence counter advance it by this amount
    /// after recording an access.
    #[inline]
    pub const fn applications(self) -> u64 {
        match self {
            Self::Load | Self::Store => 1,
            Self::Modify => 2,
        }
    }

    /// The single-letter trace token for this kind.
    pub const fn token(self) -> char {
        match self {
            Self::Load => 'L',
            Self::Store => 'S',
            Self::Modify => 'M',
        }
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl FromStr for AccessKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "L" => Ok(Self::Load),
            "S" => Ok(Self::Store),
            "M" => Ok(Self::Modify),
            other => Err(SimError::UnknownAccessKind(other.to_string())),
        }
    }
}
