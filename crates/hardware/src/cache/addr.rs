//! Address decomposition for set-associative lookup.
//!
//! A 64-bit address splits into three fields, low to high: block offset
//! (`block_bits` wide), set index (`set_bits` wide), and tag (the rest).
//! The block offset locates a byte within a block and plays no part in
//! hit/miss decisions, so [`decode`] discards it.

/// Tag and set index extracted from an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// High-order address bits above the set index field.
    pub tag: u64,
    /// Which set the address maps to, in `0..2^set_bits`.
    pub set_index: usize,
}

/// Splits `addr` into tag and set index for the given geometry.
///
/// Total for every field width up to the full 64-bit address: a shift by
/// 64 or more yields 0 rather than wrapping, so `set_bits + block_bits`
/// equal to the address width leaves an all-zero tag. Geometries wider
/// than the address are rejected at config validation and never reach
/// this function.
pub fn decode(addr: u64, set_bits: u32, block_bits: u32) -> Decoded {
    let set_index = (shr(addr, block_bits) & low_mask(set_bits)) as usize;
    let tag = shr(addr, block_bits + set_bits);
    Decoded { tag, set_index }
}

/// Logical right shift, defined as 0 for shifts of 64 or more.
fn shr(value: u64, bits: u32) -> u64 {
    value.checked_shr(bits).unwrap_or(0)
}

/// Mask selecting the low `bits` bits.
fn low_mask(bits: u32) -> u64 {
    if bits == 0 {
        0
    } else if bits >= u64::BITS {
        u64::MAX
    } else {
        (1 << bits) - 1
    }
}
