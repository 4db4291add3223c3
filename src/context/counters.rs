use std::time::Duration;

/// Counts for various things which count, roughly.
///
/// Counts are kept over the lifetime of a context, across solves.
#[derive(Clone, Debug, Default)]
pub struct Counters {
    /// A count of passes of the orchestrator over the pool.
    pub passes: usize,

    /// A count of stream steps in which lookahead grew the stream.
    pub propagations: usize,

    /// A count of literals forced by lookahead, over every stream.
    pub forced: usize,

    /// A count of merges of two streams into one.
    pub merges: usize,

    /// A count of streams added by branching.
    pub additions: usize,

    /// A count of streams removed from the pool.
    pub deletions: usize,

    /// A count of broadcasts of literals forced on the global assignment.
    pub broadcasts: usize,

    /// A count of times the pool was reseeded after exhaustion.
    pub reseeds: usize,

    /// A count of calls made to the oracle of the orchestrator.
    pub oracle_calls: usize,

    /// The count of atoms settled by the global assignment, as of the last sample of rates.
    pub solved: usize,

    /// A count of checkpoints written.
    pub checkpoints: usize,

    /// The time taken during solves.
    pub time: Duration,
}
