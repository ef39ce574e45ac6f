//! Address decomposition.
//!
//! This module splits a raw 64-bit address into the fields a set-associative
//! cache looks at. It provides the following:
//! 1. **Decoding:** `(tag, set index, block offset)` from an address and the
//!    set-index and block-offset bit widths.
//! 2. **Composition:** The inverse mapping, used for diagnostics and for
//!    checking that no address bits are lost.
//!
//! The layout, from most to least significant bit, is:
//!
//! ```text
//! | tag (64 - s - b bits) | set index (s bits) | block offset (b bits) |
//! ```

/// Returns a mask with the low `bits` bits set.
///
/// Widths of 64 and above yield an all-ones mask instead of overflowing.
#[inline(always)]
pub const fn low_mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Logical shift right that yields 0 when the whole word is shifted out.
#[inline(always)]
const fn shr(value: u64, bits: u32) -> u64 {
    if bits >= u64::BITS { 0 } else { value >> bits }
}

/// Logical shift left that yields 0 when the whole word is shifted out.
#[inline(always)]
const fn shl(value: u64, bits: u32) -> u64 {
    if bits >= u64::BITS { 0 } else { value << bits }
}

/// The cache-relevant fields of one address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DecodedAddr {
    /// Address bits above the set-index field.
    pub tag: u64,
    /// Which set the address maps to, in `[0, 2^s)`.
    pub set_index: u64,
    /// Byte within the block, in `[0, 2^b)`. Does not influence hits.
    pub block_offset: u64,
}

/// Bit widths that define how addresses map onto the cache.
///
/// Callers are expected to keep `set_bits + block_bits <= 64`; the cache
/// configuration enforces this before a layout is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressLayout {
    /// Number of set-index bits (`s`).
    pub set_bits: u32,
    /// Number of block-offset bits (`b`).
    pub block_bits: u32,
}

impl AddressLayout {
    /// Creates a new layout.
    ///
    /// # Arguments
    ///
    /// * `set_bits` - Width of the set-index field.
    /// * `block_bits` - Width of the block-offset field.
    #[inline]
    pub const fn new(set_bits: u32, block_bits: u32) -> Self {
        Self {
            set_bits,
            block_bits,
        }
    }

    /// Splits `addr` into tag, set index and block offset.
    #[inline]
    pub const fn decode(&self, addr: u64) -> DecodedAddr {
        decode(addr, self.set_bits, self.block_bits)
    }

    /// Reassembles an address from its fields.
    ///
    /// Fields wider than their slot are truncated to the slot width.
    #[inline]
    pub const fn compose(&self, fields: &DecodedAddr) -> u64 {
        let tag = shl(fields.tag, self.set_bits + self.block_bits);
        let set = shl(fields.set_index & low_mask(self.set_bits), self.block_bits);
        tag | set | (fields.block_offset & low_mask(self.block_bits))
    }

    /// Number of tag bits left over by this layout.
    pub const fn tag_bits(&self) -> u32 {
        u64::BITS.saturating_sub(self.set_bits + self.block_bits)
    }
}

/// Splits `addr` into `(tag, set index, block offset)`.
///
/// Total over every `s + b <= 64`: `s = 0` maps every address to set 0 and
/// `b = 0` gives a zero offset for every address.
///
/// # Arguments
///
/// * `addr` - Raw 64-bit address from the trace.
/// * `set_bits` - Width of the set-index field (`s`).
/// * `block_bits` - Width of the block-offset field (`b`).
#[inline]
pub const fn decode(addr: u64, set_bits: u32, block_bits: u32) -> DecodedAddr {
    let block_offset = addr & low_mask(block_bits);
    let remaining = shr(addr, block_bits);
    let set_index = remaining & low_mask(set_bits);
    let tag = shr(remaining, set_bits);
    DecodedAddr {
        tag,
        set_index,
        block_offset,
    }
}
