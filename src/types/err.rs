//! Error types used in the library.
//!
//! - Few of these are expected during a search.
//!   Failed lines of search (a contradictory stream, an oracle proof of unsatisfiability, etc.) are not errors, and are instead noted as a [deletion reason](crate::pool::DeletionReason) of the relevant stream.
//! - Errors when reading a formula are returned to the caller.
//! - Errors when reading or writing a [checkpoint](crate::checkpoint) are recovered from within a search, and only returned when the checkpoint store is used directly.
//!
//! Names of the error enums, for the most part, overlap with the structures they relate to.
//  As such, throughout the library err::{self} is often used to prefix use of the types with `err::`.

use std::path::PathBuf;

use thiserror::Error;

use crate::pool::StreamId;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ErrorKind {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("checkpoint error: {0}")]
    Checkpoint(#[from] CheckpointError),

    /// A request was made which does not fit the state of the context, e.g. a request for a model before a model is found.
    #[error("the request does not fit the state of the context")]
    InvalidState,
}

/// Noted errors when configuring a context.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ConfigError {
    /// Some value was outside the bounds of an option.
    #[error("{name} requires a value from {min} to {max}, found {value}")]
    OutOfRange {
        name: &'static str,
        value: String,
        min: String,
        max: String,
    },
}

/// Noted errors when parsing a DIMACS formula.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ParseError {
    /// The line could not be read.
    #[error("line {0} could not be read")]
    Line(usize),

    /// A problem line was found, though not of the form `p cnf <atoms> <clauses>`.
    #[error("line {0} is a malformed problem specification")]
    ProblemSpecification(usize),

    /// Some token was not a literal.
    #[error("line {line}: '{token}' is not a literal")]
    Token { line: usize, token: String },
}

/// Noted errors when reading or writing a checkpoint.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum CheckpointError {
    /// Some interaction with the file system failed.
    #[error("{kind} at {path:?}")]
    Io {
        path: PathBuf,
        kind: std::io::ErrorKind,
    },

    /// A line of the manifest of active streams was not a stream id.
    #[error("line {0} of the manifest is not a stream id")]
    Manifest(usize),

    /// A stream is listed in the manifest, though without a file.
    #[error("stream {0} is listed as active but has no file")]
    MissingStream(StreamId),

    /// The file of a stream was not a collection of unit clauses.
    #[error("the file of stream {0} is not a collection of unit clauses")]
    MalformedStream(StreamId),
}

impl CheckpointError {
    /// An [Io](CheckpointError::Io) error, from the path of the failure and the error.
    pub fn io(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        CheckpointError::Io {
            path: path.into(),
            kind: error.kind(),
        }
    }
}
