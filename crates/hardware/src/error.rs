//! Error types for configuration and trace handling.
//!
//! Two failure domains exist and both are fatal to a run:
//! 1. **[`ConfigError`]:** The requested geometry cannot describe a cache.
//!    Raised before any trace record is processed.
//! 2. **[`TraceError`]:** A trace record could not be read or understood.
//!    Under the strict policy this aborts the replay; the lenient policy
//!    skips the record and tallies it (see [`crate::replay::MalformedPolicy`]).
//!
//! There are no transient failure modes and no retries: a run is a
//! deterministic single-pass batch computation.

use thiserror::Error;

use crate::config::ADDRESS_BITS;

/// Rejected cache geometry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The associativity was zero; a set must hold at least one line.
    #[error("associativity (E) must be at least 1")]
    ZeroAssociativity,

    /// Set index and block offset bits together exceed the address width,
    /// leaving no defined bit range for the tag.
    #[error(
        "set bits ({set_bits}) + block bits ({block_bits}) exceed the \
         {ADDRESS_BITS}-bit address width"
    )]
    AddressOverflow {
        /// Requested set index bit count.
        set_bits: u32,
        /// Requested block offset bit count.
        block_bits: u32,
    },

    /// The set count `2^set_bits` does not fit in a host `usize`.
    #[error("2^{set_bits} sets cannot be allocated on this host")]
    TooManySets {
        /// Requested set index bit count.
        set_bits: u32,
    },
}

/// Failure while reading or parsing a trace.
///
/// Parse variants carry the raw text of the offending record and its
/// 1-based position in the trace so the record can be located and fixed.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The record's operation code is not one of `I`, `L`, `S`, `M`.
    #[error("record {ordinal}: unrecognized operation in {raw:?}")]
    UnknownOperation {
        /// 1-based line number of the record in the trace.
        ordinal: u64,
        /// Raw text of the offending line.
        raw: String,
    },

    /// The record's address or size field failed to parse, or the record
    /// does not have the `op addr,size` shape.
    #[error("record {ordinal}: malformed access record {raw:?}")]
    Malformed {
        /// 1-based line number of the record in the trace.
        ordinal: u64,
        /// Raw text of the offending line.
        raw: String,
    },

    /// The underlying reader failed. Always fatal, even under the lenient
    /// malformed-record policy.
    #[error("failed to read trace")]
    Io(#[from] std::io::Error),
}

impl TraceError {
    /// The 1-based trace position of the offending record, if this error
    /// refers to one.
    pub const fn ordinal(&self) -> Option<u64> {
        match self {
            Self::UnknownOperation { ordinal, .. } | Self::Malformed { ordinal, .. } => {
                Some(*ordinal)
            }
            Self::Io(_) => None,
        }
    }
}
