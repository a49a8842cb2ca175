//! Configuration for the cache simulator.
//!
//! This module defines the cache geometry parameters and their validation.
//! The geometry follows the conventional (s, E, b) description of a
//! set-associative cache:
//! 1. **`set_bits` (s):** The cache has `2^s` sets.
//! 2. **`ways` (E):** Each set holds up to E lines.
//! 3. **`block_bits` (b):** Each block spans `2^b` bytes; the low b address
//!    bits locate a byte within a block and never affect hit/miss decisions.
//!
//! A config is plain data; [`CacheConfig::validate`] checks it, and
//! [`crate::cache::CacheSim::new`] refuses to construct a simulator from an
//! invalid one. Geometry is immutable for the lifetime of a simulator.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Width of a simulated memory address in bits.
///
/// Set index and block offset bits are carved out of the low end of an
/// address; whatever remains above them is the tag.
pub const ADDRESS_BITS: u32 = 64;

/// Cache geometry: set count, associativity, and block size, all as powers
/// of two except the associativity.
///
/// # Examples
///
/// ```
/// use csim_core::config::CacheConfig;
///
/// // 4 sets, direct-mapped, 4-byte blocks.
/// let config = CacheConfig::new(2, 1, 2);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.num_sets(), 4);
/// assert_eq!(config.block_bytes(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Number of set index bits (the cache has `2^set_bits` sets).
    pub set_bits: u32,
    /// Associativity: lines per set. Must be at least 1.
    pub ways: usize,
    /// Number of block offset bits (each block spans `2^block_bits` bytes).
    pub block_bits: u32,
}

impl CacheConfig {
    /// Creates a new geometry from raw (s, E, b) values without validating.
    pub const fn new(set_bits: u32, ways: usize, block_bits: u32) -> Self {
        Self {
            set_bits,
            ways,
            block_bits,
        }
    }

    /// Checks that the geometry describes a realizable cache.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::ZeroAssociativity`] if `ways` is zero.
    /// * [`ConfigError::AddressOverflow`] if the set index and block offset
    ///   fields together exceed the address width, which would leave no
    ///   defined bit position for the tag.
    /// * [`ConfigError::TooManySets`] if `2^set_bits` cannot be represented
    ///   as a host `usize`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ways == 0 {
            return Err(ConfigError::ZeroAssociativity);
        }
        if self.set_bits.saturating_add(self.block_bits) > ADDRESS_BITS {
            return Err(ConfigError::AddressOverflow {
                set_bits: self.set_bits,
                block_bits: self.block_bits,
            });
        }
        if self.set_bits >= usize::BITS {
            return Err(ConfigError::TooManySets {
                set_bits: self.set_bits,
            });
        }
        Ok(())
    }

    /// Number of sets described by this geometry.
    ///
    /// Meaningful only for a validated config; an unvalidated `set_bits`
    /// of `usize::BITS` or more saturates to `usize::MAX`.
    pub const fn num_sets(&self) -> usize {
        match 1_usize.checked_shl(self.set_bits) {
            Some(n) => n,
            None => usize::MAX,
        }
    }

    /// Block size in bytes described by this geometry.
    ///
    /// Saturates like [`Self::num_sets`] for out-of-range `block_bits`.
    pub const fn block_bytes(&self) -> u64 {
        match 1_u64.checked_shl(self.block_bits) {
            Some(n) => n,
            None => u64::MAX,
        }
    }
}
