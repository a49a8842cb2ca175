//! A single cache set: a fixed-capacity group of lines sharing one index.

use super::Outcome;

/// One cache line slot.
///
/// `last_use` holds the logical clock value of the most recent hit or
/// install; it is only meaningful while `valid` is set.
#[derive(Debug, Clone, Default)]
pub(super) struct CacheLine {
    pub(super) valid: bool,
    pub(super) tag: u64,
    pub(super) last_use: u64,
}

/// Fixed-length sequence of line slots, capacity set at construction.
///
/// Invariants: at most one valid line per distinct tag, and exactly one
/// slot changes occupancy per access.
#[derive(Debug)]
pub(super) struct CacheSet {
    lines: Vec<CacheLine>,
}

impl CacheSet {
    pub(super) fn new(ways: usize) -> Self {
        Self {
            lines: vec![CacheLine::default(); ways],
        }
    }

    /// Resolves one access against this set, stamping `now` on the line
    /// that services it.
    ///
    /// A matching valid line is a hit and is refreshed. Otherwise the
    /// lowest-indexed empty slot is filled; with no empty slot, the LRU
    /// line is overwritten and the access reports an eviction.
    pub(super) fn access(&mut self, tag: u64, now: u64) -> Outcome {
        let mut empty = None;
        for (way, line) in self.lines.iter_mut().enumerate() {
            if line.valid {
                if line.tag == tag {
                    line.last_use = now;
                    return Outcome::Hit;
                }
            } else if empty.is_none() {
                empty = Some(way);
            }
        }

        if let Some(way) = empty {
            self.lines[way] = CacheLine {
                valid: true,
                tag,
                last_use: now,
            };
            return Outcome::Miss;
        }

        let way = self.victim();
        let line = &mut self.lines[way];
        line.tag = tag;
        line.last_use = now;
        Outcome::Eviction
    }

    /// Way holding the least recently used line.
    ///
    /// Left-to-right scan replacing the candidate only on a strictly
    /// smaller timestamp, so the lowest way wins any tie.
    fn victim(&self) -> usize {
        let mut victim = 0;
        for (way, line) in self.lines.iter().enumerate().skip(1) {
            if line.last_use < self.lines[victim].last_use {
                victim = way;
            }
        }
        victim
    }

    /// Whether a valid line with `tag` is resident. Read-only probe; does
    /// not refresh recency.
    pub(super) fn contains(&self, tag: u64) -> bool {
        self.lines.iter().any(|line| line.valid && line.tag == tag)
    }

    /// Number of valid lines currently resident.
    pub(super) fn occupancy(&self) -> usize {
        self.lines.iter().filter(|line| line.valid).count()
    }
}
