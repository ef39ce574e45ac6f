//! Memory Trace Reader.
//!
//! This module tokenises Valgrind `lackey`-style memory traces. It performs:
//! 1. **Filtering:** Blank lines and instruction fetches are skipped.
//! 2. **Tokenising:** Data lines become `TraceRecord`s (kind, address, size).
//! 3. **Diagnostics:** Malformed lines are reported with their line number.
//!
//! ```text
//! I 0400d7d4,8
//!  L 7ff0005c8,8
//!  S 7ff0005d0,4
//!  M 0421c7f0,4
//! ```
//!
//! Data lines start with a space; instruction fetches start in column 0.

use std::fmt;
use std::io::{self, BufRead};
use std::str::FromStr;

use crate::common::{AccessKind, Result, SimError};

/// One data access read from a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Load, store or modify.
    pub kind: AccessKind,
    /// Accessed address.
    pub address: u64,
    /// Access width in bytes. Carried for display only.
    pub size: u64,
}

impl TraceRecord {
    /// Creates a record.
    pub const fn new(kind: AccessKind, address: u64, size: u64) -> Self {
        Self {
            kind,
            address,
            size,
        }
    }
}

fn malformed(reason: impl Into<String>) -> SimError {
    SimError::MalformedTrace {
        line: 0,
        reason: reason.into(),
    }
}

impl FromStr for TraceRecord {
    type Err = SimError;

    /// Parses `<kind> <hex address>,<size>`; surrounding whitespace and
    /// anything after the operand are ignored.
    fn from_str(s: &str) -> Result<Self> {
        let mut tokens = s.split_whitespace();
        let kind: AccessKind = tokens
            .next()
            .ok_or_else(|| malformed("missing access kind"))?
            .parse()?;
        let operand = tokens
            .next()
            .ok_or_else(|| malformed("missing `<address>,<size>` operand"))?;

        let mut parts = operand.split(',');
        let (Some(addr), Some(size), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed(format!(
                "expected `<address>,<size>`, found `{operand}`"
            )));
        };

        let digits = addr
            .strip_prefix("0x")
            .or_else(|| addr.strip_prefix("0X"))
            .unwrap_or(addr);
        let address = u64::from_str_radix(digits, 16)
            .map_err(|e| malformed(format!("bad hex address `{addr}`: {e}")))?;
        let size = size
            .parse::<u64>()
            .map_err(|e| malformed(format!("bad access size `{size}`: {e}")))?;

        Ok(Self::new(kind, address, size))
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:x},{}", self.kind, self.address, self.size)
    }
}

/// Parses one raw trace line.
///
/// Returns `Ok(None)` for blank lines and instruction fetches.
///
/// # Errors
///
/// Returns [`SimError::UnknownAccessKind`] or [`SimError::MalformedTrace`]
/// for data lines that do not parse.
pub fn parse_line(line: &str) -> Result<Option<TraceRecord>> {
    if line.trim().is_empty() || !line.starts_with(' ') {
        return Ok(None);
    }
    line.parse().map(Some)
}

/// Iterator over the data records of a trace.
#[derive(Debug)]
pub struct TraceReader<R> {
    lines: io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    /// Number of raw lines consumed so far.
    pub const fn line_no(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_no += 1;
            match parse_line(&line) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => {}
                Err(e) => return Some(Err(e.at_line(self.line_no))),
            }
        }
    }
}
