use std::sync::{OnceLock, PoisonError, RwLock};

use crate::{
    pool::{DeletionReason, StreamId},
    structures::assignment::Assignment,
};

/// A candidate partial assignment.
///
/// Identity of a stream is the id, and two streams may hold equal assignments.
pub struct Stream {
    id: StreamId,

    assignment: RwLock<Assignment>,

    /// Set once, on marking the stream for deletion.
    mark: OnceLock<DeletionReason>,
}

impl Stream {
    pub(super) fn new(id: StreamId, assignment: Assignment) -> Self {
        Stream {
            id,
            assignment: RwLock::new(assignment),
            mark: OnceLock::new(),
        }
    }

    pub fn id(&self) -> StreamId {
        self.id
    }

    /// A copy of the assignment of the stream.
    pub fn snapshot(&self) -> Assignment {
        self.with_assignment(Assignment::clone)
    }

    /// Applies `f` to the assignment of the stream, holding a read lock for the duration of `f`.
    pub fn with_assignment<T>(&self, f: impl FnOnce(&Assignment) -> T) -> T {
        let assignment = self.assignment.read().unwrap_or_else(PoisonError::into_inner);
        f(&assignment)
    }

    /// A count of the literals of the stream.
    pub fn len(&self) -> usize {
        self.with_assignment(Assignment::len)
    }

    pub fn is_empty(&self) -> bool {
        self.with_assignment(Assignment::is_empty)
    }

    /// Replaces the assignment of the stream.
    pub fn replace(&self, assignment: Assignment) {
        *self.assignment.write().unwrap_or_else(PoisonError::into_inner) = assignment;
    }

    /// Marks the stream for deletion, returning true if the stream was not already marked.
    pub fn mark(&self, reason: DeletionReason) -> bool {
        self.mark.set(reason).is_ok()
    }

    pub fn is_marked(&self) -> bool {
        self.mark.get().is_some()
    }

    /// The reason the stream was marked for deletion, if marked.
    pub fn mark_reason(&self) -> Option<DeletionReason> {
        self.mark.get().copied()
    }
}

impl std::fmt::Debug for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stream")
            .field("id", &self.id)
            .field("len", &self.len())
            .field("mark", &self.mark_reason())
            .finish()
    }
}
