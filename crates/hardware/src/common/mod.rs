//! Common types shared by every part of the simulator.
//!
//! This module provides the fundamental building blocks used across the crate. It includes:
//! 1. **Address Decoding:** Splitting addresses into tag, set index and block offset.
//! 2. **Access Kinds:** The closed set of data accesses a trace can contain.
//! 3. **Error Handling:** The crate-wide error type and result alias.

/// Address decomposition (tag / set index / block offset).
pub mod addr;

/// Memory access kind definitions.
pub mod data;

/// Error types.
pub mod error;

pub use addr::{AddressLayout, DecodedAddr, decode};
pub use data::AccessKind;
pub use error::{Result, SimError};
