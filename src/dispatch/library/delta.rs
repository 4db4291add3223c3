//! Changes to the stream pool and the global assignment.

use crate::{
    pool::{DeletionReason, StreamId},
    structures::{atom::Atom, literal::CLiteral},
};

/// A change of some kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delta {
    /// A change to the stream pool.
    Pool(self::Pool),

    /// A change to the global assignment.
    Global(self::Global),
}

/// Changes to the stream pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pool {
    /// A stream was added to an empty pool, from the root assignment or a checkpoint.
    Seeded(StreamId),

    /// A stream grew by lookahead.
    Propagated { id: StreamId, forced: usize },

    /// Two streams were replaced by a stream holding their intersection.
    Merged {
        from: (StreamId, StreamId),
        into: StreamId,
        size: usize,
    },

    /// A stream was split on an atom, into the source with the atom false and a fresh stream with the atom true.
    Branched {
        from: StreamId,
        into: StreamId,
        atom: Atom,
    },

    /// A stream was marked for deletion.
    Marked { id: StreamId, reason: DeletionReason },

    /// A marked stream was removed.
    Removed { id: StreamId, reason: DeletionReason },

    /// Every stream was deleted, and the pool was reseeded with the root assignment.
    Reseeded(StreamId),
}

/// Changes to the global assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Global {
    /// Literals forced by lookahead on the global assignment, applied to every stream.
    Broadcast(Vec<CLiteral>),

    /// Lookahead on the global assignment found no consistent valuation of some window.
    Contradiction,

    /// The global assignment was recomputed as the intersection of all streams.
    Recomputed { size: usize },

    /// The variable ordering was recomputed.
    Ordering { unassigned: usize },
}
