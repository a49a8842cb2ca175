//! Trace replay driver.
//!
//! The replayer walks a trace in order, feeding each record to the cache
//! simulator. Order is significant: it is what "recently used" means.
//! Per-record rules:
//! 1. **Instruction fetches** are skipped entirely: no cache access, no
//!    counter movement.
//! 2. **Loads and stores** perform exactly one access.
//! 3. **Modifies** perform two sequential accesses to the same address.
//!    The first resolves like any access; the second always hits, since
//!    the first just installed or refreshed the line and nothing can
//!    intervene within one record.
//!
//! Malformed records follow the configured [`MalformedPolicy`]. I/O errors
//! from the underlying reader abort the run under either policy.

use crate::cache::{CacheSim, Outcome};
use crate::error::TraceError;
use crate::stats::Statistics;
use crate::trace::{AccessRecord, Operation};

/// What to do with a record that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Abort the run, reporting the offending record.
    #[default]
    Strict,
    /// Skip the record and count it; the tally is reported by
    /// [`Replayer::skipped`].
    Lenient,
}

/// Resolution of one replayed record, as observed by the caller.
#[derive(Debug, Clone, Copy)]
pub struct RecordEvent<'a> {
    /// The record that was replayed.
    pub record: &'a AccessRecord,
    /// Outcome of the record's (first) cache access.
    pub first: Outcome,
    /// Outcome of the second access a modify performs; `None` for loads
    /// and stores.
    pub second: Option<Outcome>,
}

/// Replay driver: owns a [`CacheSim`] and applies trace records to it.
#[derive(Debug)]
pub struct Replayer {
    sim: CacheSim,
    policy: MalformedPolicy,
    skipped: u64,
}

impl Replayer {
    /// Creates a strict replayer around a simulator.
    pub const fn new(sim: CacheSim) -> Self {
        Self::with_policy(sim, MalformedPolicy::Strict)
    }

    /// Creates a replayer with an explicit malformed-record policy.
    pub const fn with_policy(sim: CacheSim, policy: MalformedPolicy) -> Self {
        Self {
            sim,
            policy,
            skipped: 0,
        }
    }

    /// Replays parse results in trace order and returns the final counters.
    ///
    /// # Errors
    ///
    /// The first [`TraceError`] encountered under the strict policy, or
    /// any I/O error under either policy.
    pub fn run<I>(&mut self, records: I) -> Result<Statistics, TraceError>
    where
        I: IntoIterator<Item = Result<AccessRecord, TraceError>>,
    {
        self.run_with(records, |_| {})
    }

    /// Replays parse results, invoking `observer` once per processed
    /// record. Skipped instruction fetches and skipped malformed records
    /// are not observed.
    ///
    /// # Errors
    ///
    /// As for [`Self::run`].
    pub fn run_with<I, F>(&mut self, records: I, mut observer: F) -> Result<Statistics, TraceError>
    where
        I: IntoIterator<Item = Result<AccessRecord, TraceError>>,
        F: FnMut(&RecordEvent<'_>),
    {
        for item in records {
            let record = match item {
                Ok(record) => record,
                Err(err @ TraceError::Io(_)) => return Err(err),
                Err(err) => match self.policy {
                    MalformedPolicy::Strict => return Err(err),
                    MalformedPolicy::Lenient => {
                        self.skipped += 1;
                        continue;
                    }
                },
            };

            if record.op == Operation::InstructionFetch {
                continue;
            }

            let first = self.sim.access(record.addr);
            let second = if record.op == Operation::Modify {
                Some(self.sim.access(record.addr))
            } else {
                None
            };
            observer(&RecordEvent {
                record: &record,
                first,
                second,
            });
        }
        Ok(*self.sim.stats())
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> &Statistics {
        self.sim.stats()
    }

    /// Number of malformed records skipped under the lenient policy.
    pub const fn skipped(&self) -> u64 {
        self.skipped
    }

    /// The underlying simulator, for residency probes after a run.
    pub const fn sim(&self) -> &CacheSim {
        &self.sim
    }
}
