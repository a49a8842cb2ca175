//! Set-associative cache behavior simulator library.
//!
//! This crate replays memory access traces against a modeled cache and reports
//! the decisions an LRU cache controller would make. It provides:
//! 1. **Cache model:** Address decomposition, set/line bookkeeping, and LRU
//!    replacement with deterministic tie-breaking.
//! 2. **Trace handling:** Access record parsing and a buffered trace reader.
//! 3. **Replay:** A driver that feeds records to the simulator, with strict or
//!    lenient handling of malformed input.
//! 4. **Statistics:** Hit, miss, and eviction counters accumulated over a run.
//!
//! The model is behavioral only: it decides hit/miss/eviction, not timing.

/// Cache model (simulator, sets, lines, address decomposition).
pub mod cache;
/// Simulator configuration (cache geometry and validation).
pub mod config;
/// Error types for configuration and trace handling.
pub mod error;
/// Trace replay driver (record iteration, Modify semantics, malformed-record policy).
pub mod replay;
/// Statistics accumulation (hits, misses, evictions).
pub mod stats;
/// Access records, trace line parsing, and the trace reader.
pub mod trace;

/// Cache geometry; validate with [`CacheConfig::validate`] or construct a simulator directly.
pub use crate::config::CacheConfig;
/// Main simulator type; construct with [`CacheSim::new`] from a validated config.
pub use crate::cache::CacheSim;
/// Replay driver; wraps a [`CacheSim`] and consumes access records.
pub use crate::replay::Replayer;
/// Final counter triple for a run.
pub use crate::stats::Statistics;
