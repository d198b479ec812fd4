//! Crate-wide error types, one enum per concern: small hand-written
//! `Display`/`Error` impls rather than a single catch-all.

use std::fmt;

/// Failure parsing the content of a single kernel/pseudo-filesystem file.
/// Callers skip the offending line rather than propagating this — it
/// exists for readers that need to report a whole source as malformed
/// after too many bad lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { message: msg.into() }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Failure collecting one entity (one process, one tape drive, ...).
/// Distinguishes "the subject disappeared" (non-fatal — the entity just
/// exited or was unplugged) from "I/O or parse failure" so collectors
/// can decide whether to keep the entity's previous snapshot or drop it
/// for this tick.
#[derive(Debug)]
pub enum CollectError {
    /// The underlying `/proc/<id>` (or similar) directory vanished between
    /// enumeration and read — entity disappeared mid-tick.
    Gone,
    Io(std::io::Error),
    Parse(ParseError),
}

impl fmt::Display for CollectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectError::Gone => write!(f, "entity disappeared during collection"),
            CollectError::Io(e) => write!(f, "I/O error: {e}"),
            CollectError::Parse(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CollectError {}

impl From<std::io::Error> for CollectError {
    fn from(e: std::io::Error) -> Self {
        CollectError::Io(e)
    }
}

impl From<ParseError> for CollectError {
    fn from(e: ParseError) -> Self {
        CollectError::Parse(e)
    }
}

/// Fatal errors that propagate to the scheduler's entry point unchanged
/// and end the run.
#[derive(Debug)]
pub enum FatalError {
    /// Growing a snapshot buffer failed (out of memory). Exit code 4.
    Allocation,
    /// The emission sink could not be written to. Exit code 6.
    SinkUnreachable(std::io::Error),
}

impl fmt::Display for FatalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FatalError::Allocation => write!(f, "allocation failure"),
            FatalError::SinkUnreachable(e) => write!(f, "sink unreachable: {e}"),
        }
    }
}

impl std::error::Error for FatalError {}

impl FatalError {
    /// Process exit code a front-end should exit with on this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            FatalError::Allocation => 4,
            FatalError::SinkUnreachable(_) => 6,
        }
    }
}
