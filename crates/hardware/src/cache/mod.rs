//! Set-Associative Cache Simulator.
//!
//! This module implements the cache behavior model: `2^s` independent sets
//! of `E` lines each, looked up by the set index bits of an address and
//! matched by tag. Replacement is true LRU driven by a global monotonic
//! logical clock: every hit or install stamps the line with the next clock
//! value, and a full set evicts the line with the oldest stamp, lowest way
//! first on ties.
//!
//! The model decides hit/miss/eviction only. It carries no data, models no
//! timing, and distinguishes loads from stores only in the caller.

/// Address decomposition into tag and set index.
pub mod addr;

mod set;

use tracing::{debug, trace};

use self::addr::{Decoded, decode};
use self::set::CacheSet;
use crate::config::CacheConfig;
use crate::error::ConfigError;
use crate::stats::Statistics;

/// Resolution of a single cache access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The tag was resident; its line's recency was refreshed.
    Hit,
    /// The tag was absent and an empty slot absorbed it.
    Miss,
    /// The tag was absent and installing it displaced a valid line.
    Eviction,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hit => write!(f, "hit"),
            Self::Miss => write!(f, "miss"),
            Self::Eviction => write!(f, "miss eviction"),
        }
    }
}

/// Cache simulator: owns the sets, the immutable geometry, the logical
/// clock, and the run statistics.
///
/// Constructed once per run from a validated [`CacheConfig`]; all state is
/// discarded with the value. Independent simulators share nothing, so any
/// number can coexist.
#[derive(Debug)]
pub struct CacheSim {
    sets: Vec<CacheSet>,
    set_bits: u32,
    block_bits: u32,
    ways: usize,
    clock: u64,
    stats: Statistics,
}

impl CacheSim {
    /// Builds a simulator for the given geometry.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`CacheConfig::validate`] if the
    /// geometry is rejected; no partial simulator is created.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let num_sets = config.num_sets();
        debug!(
            sets = num_sets,
            ways = config.ways,
            block_bytes = config.block_bytes(),
            "cache geometry"
        );
        Ok(Self {
            sets: (0..num_sets).map(|_| CacheSet::new(config.ways)).collect(),
            set_bits: config.set_bits,
            block_bits: config.block_bits,
            ways: config.ways,
            clock: 0,
            stats: Statistics::default(),
        })
    }

    /// Resolves one access and records its outcome in the statistics.
    ///
    /// Advances the logical clock, routes the address to its set, and lets
    /// the set service the access.
    pub fn access(&mut self, addr: u64) -> Outcome {
        self.clock += 1;
        let Decoded { tag, set_index } = decode(addr, self.set_bits, self.block_bits);
        let outcome = self.sets[set_index].access(tag, self.clock);
        trace!(addr, set_index, tag, %outcome);
        self.stats.record(outcome);
        outcome
    }

    /// Whether the block containing `addr` is resident. Read-only probe;
    /// neither the clock nor any recency stamp moves.
    pub fn contains(&self, addr: u64) -> bool {
        let Decoded { tag, set_index } = decode(addr, self.set_bits, self.block_bits);
        self.sets[set_index].contains(tag)
    }

    /// Number of valid lines currently resident in the set `addr` maps to.
    pub fn set_occupancy(&self, addr: u64) -> usize {
        let Decoded { set_index, .. } = decode(addr, self.set_bits, self.block_bits);
        self.sets[set_index].occupancy()
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> &Statistics {
        &self.stats
    }

    /// Number of sets in the cache.
    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    /// Lines per set.
    pub const fn ways(&self) -> usize {
        self.ways
    }
}
