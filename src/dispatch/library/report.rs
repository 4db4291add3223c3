//! Details on the result of some procedure.

use std::path::PathBuf;

/// Reports from the context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Report {
    /// Information regarding a solve.
    Solve(self::Solve),

    /// Information regarding checkpoints.
    Checkpoint(self::Checkpoint),

    /// Information regarding the parse when building the context.
    Parser(self::Parser),

    /// No further dispatches will be sent regarding the current solve.
    Finish,
}

/// High-level reports regarding a solve.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Solve {
    /// The formula of the context is satisfiable.
    Satisfiable,

    /// The formula of the context is unsatisfiable.
    Unsatisfiable,

    /// Satisfiability of the formula of the context could not be determined within the time allowed.
    TimeUp,

    /// Satisfiability of the formula of the context is unknown, for some reason.
    Unknown,
}

/// Information regarding checkpoints.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Checkpoint {
    /// A checkpoint of some count of streams was restored.
    Loaded { streams: usize, directory: PathBuf },

    /// A checkpoint of some count of streams was written.
    Saved { streams: usize, directory: PathBuf },

    /// Reading or writing a checkpoint failed, and the search continued.
    Failed(String),
}

/// Information regarding the parse when building the context.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Parser {
    /// A DIMACS file has been loaded.
    Load(String),

    /// The expected atom/clause count based on the header of a DIMACS file.
    Expected(usize, usize),

    /// A count of atoms/clauses of the formula built from a DIMACS file.
    Counts(usize, usize),
}

impl std::fmt::Display for self::Solve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Satisfiable => write!(f, "Satisfiable"),
            Self::Unsatisfiable => write!(f, "Unsatisfiable"),
            Self::TimeUp => write!(f, "Unknown (time up)"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}
