//! Unit tests, one module per simulator component.

/// Replay semantics (record kinds, policies, worked examples).
pub mod replay;
/// Counter accumulation and serialization.
pub mod stats;
