//! Access records, trace line parsing, and the trace reader.
//!
//! A trace is a sequence of lines of the shape `op addr,size`, one record
//! per line, where `op` is one of `I` (instruction fetch), `L` (load),
//! `S` (store), `M` (modify), `addr` is a hexadecimal byte address, and
//! `size` is a decimal access width:
//!
//! ```text
//!  L 7ff000,4
//!  M 7ff004,4
//! I 0400d7d4,8
//! ```
//!
//! Leading whitespace is accepted on any line and blank lines are ignored.
//! Anything else is a parse error carrying the raw line and its 1-based
//! position; it never produces a record with indeterminate fields.

use std::io::BufRead;

use crate::error::TraceError;

/// Kind of memory access a trace record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Instruction fetch. Carried through parsing but never replayed
    /// against the data cache.
    InstructionFetch,
    /// Data load.
    Load,
    /// Data store.
    Store,
    /// Data modify: a load followed by a store to the same address.
    Modify,
}

impl Operation {
    /// Maps a trace operation code to its operation.
    fn from_code(code: char) -> Option<Self> {
        match code {
            'I' => Some(Self::InstructionFetch),
            'L' => Some(Self::Load),
            'S' => Some(Self::Store),
            'M' => Some(Self::Modify),
            _ => None,
        }
    }

    /// The single-letter code used in trace files.
    pub const fn code(self) -> char {
        match self {
            Self::InstructionFetch => 'I',
            Self::Load => 'L',
            Self::Store => 'S',
            Self::Modify => 'M',
        }
    }
}

/// One structured memory access from a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessRecord {
    /// What kind of access this is.
    pub op: Operation,
    /// Byte address accessed.
    pub addr: u64,
    /// Access width in bytes. Never affects hit/miss decisions at line
    /// granularity; retained for rendering.
    pub size: u64,
}

impl AccessRecord {
    /// Parses one trace line into a record.
    ///
    /// `ordinal` is the line's 1-based position in the trace and is only
    /// used to label errors.
    ///
    /// # Errors
    ///
    /// [`TraceError::UnknownOperation`] if the operation code is not one
    /// of the four recognized letters; [`TraceError::Malformed`] if the
    /// line does not split into `op` and `addr,size` tokens or either
    /// field fails to parse.
    pub fn parse(line: &str, ordinal: u64) -> Result<Self, TraceError> {
        let malformed = || TraceError::Malformed {
            ordinal,
            raw: line.to_owned(),
        };

        let mut tokens = line.split_whitespace();
        let op_token = tokens.next().ok_or_else(malformed)?;
        let fields = tokens.next().ok_or_else(malformed)?;
        if tokens.next().is_some() {
            return Err(malformed());
        }

        let mut chars = op_token.chars();
        let code = chars.next().ok_or_else(malformed)?;
        if chars.next().is_some() {
            return Err(malformed());
        }
        let op = Operation::from_code(code).ok_or(TraceError::UnknownOperation {
            ordinal,
            raw: line.to_owned(),
        })?;

        let (addr, size) = fields.split_once(',').ok_or_else(malformed)?;
        let addr = u64::from_str_radix(addr, 16).map_err(|_| malformed())?;
        let size = size.parse::<u64>().map_err(|_| malformed())?;

        Ok(Self { op, addr, size })
    }
}

/// Streaming reader turning trace lines into [`AccessRecord`]s.
///
/// Wraps any [`BufRead`] source and yields one parse result per non-blank
/// line. I/O failures surface as [`TraceError::Io`]; the reader does not
/// attempt to continue past them.
#[derive(Debug)]
pub struct TraceReader<R> {
    source: R,
    line: String,
    ordinal: u64,
}

impl<R: BufRead> TraceReader<R> {
    /// Creates a reader over a buffered trace source.
    pub const fn new(source: R) -> Self {
        Self {
            source,
            line: String::new(),
            ordinal: 0,
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<AccessRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line.clear();
            match self.source.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(err) => return Some(Err(err.into())),
            }
            self.ordinal += 1;
            if self.line.trim().is_empty() {
                continue;
            }
            let trimmed = self.line.trim_end_matches(['\n', '\r']);
            return Some(AccessRecord::parse(trimmed, self.ordinal));
        }
    }
}
