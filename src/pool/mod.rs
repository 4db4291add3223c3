/*!
The pool of streams, the shared state of a search.

A [Stream] is a candidate partial assignment, identified by an id which is never reused.
The [StreamPool] is the collection of streams currently present.

# Access

The pool is shared between the orchestrator of a search and each verifier thread.
- The orchestrator is the only writer of pool membership, and the only writer of each stream's assignment.
- Verifier threads read snapshots of streams, and may [mark](Stream::mark) a stream for deletion.

Marking is monotone and idempotent, and marked streams are removed by the orchestrator on its next [sweep](StreamPool::remove_marked).
A verifier holding a stream which has since been removed holds a stale, though valid, snapshot, and nothing follows from marking such a stream.

Each stream guards its assignment with its own lock, and readers take a copy of the assignment, so no lock is held during propagation or oracle calls.

# Example

```rust
# use stream_sat::pool::{DeletionReason, StreamPool};
# use stream_sat::structures::assignment::Assignment;
let pool = StreamPool::default();
let a = pool.add(Assignment::from_literals([1, 2]));
let b = pool.add(Assignment::from_literals([1, -2]));

assert_eq!(pool.intersection(), Some(Assignment::from_literals([1])));

assert!(b.mark(DeletionReason::OracleUnsat));
assert!(!b.mark(DeletionReason::LocalConflict));

let removed = pool.remove_marked();
assert_eq!(removed, vec![(b.id(), DeletionReason::OracleUnsat)]);
assert_eq!(pool.len(), 1);
assert_eq!(pool.intersection(), Some(a.snapshot()));
```
*/

mod stream;
pub use stream::Stream;

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
};

use rand::seq::SliceRandom;

use crate::structures::assignment::Assignment;

/// The identifier of a stream.
pub type StreamId = u64;

/// Why a stream was marked for deletion.
///
/// Each reason is a refutation of the assignment of the stream, with respect to the formula of the search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeletionReason {
    /// The assignment of the stream contains some literal and its negation.
    LocalConflict,

    /// Lookahead found no consistent valuation of some window of atoms.
    LocalUnsat,

    /// The exact oracle found the assignment of the stream unsatisfiable.
    OracleUnsat,

    /// The assignment of the stream assigns every atom, though is not a model.
    FullInconsistent,
}

impl std::fmt::Display for DeletionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LocalConflict => write!(f, "local conflict"),
            Self::LocalUnsat => write!(f, "local unsat"),
            Self::OracleUnsat => write!(f, "oracle unsat"),
            Self::FullInconsistent => write!(f, "full inconsistent"),
        }
    }
}

/// The pool of streams.
#[derive(Default)]
pub struct StreamPool {
    streams: RwLock<Vec<Arc<Stream>>>,

    /// The id of the next stream.
    next_id: AtomicU64,
}

impl StreamPool {
    fn read(&self) -> RwLockReadGuard<'_, Vec<Arc<Stream>>> {
        self.streams.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Arc<Stream>>> {
        self.streams.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a fresh stream holding `assignment` to the pool.
    pub fn add(&self, assignment: Assignment) -> Arc<Stream> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let stream = Arc::new(Stream::new(id, assignment));
        self.write().push(stream.clone());
        stream
    }

    /// Adds a stream with a given id, as when restoring a checkpoint.
    ///
    /// Ids of streams added after are greater than `id`.
    pub fn restore(&self, id: StreamId, assignment: Assignment) -> Arc<Stream> {
        self.next_id.fetch_max(id + 1, Ordering::Relaxed);
        let stream = Arc::new(Stream::new(id, assignment));
        self.write().push(stream.clone());
        stream
    }

    /// A snapshot of the streams currently in the pool, in order of addition.
    pub fn streams(&self) -> Vec<Arc<Stream>> {
        self.read().clone()
    }

    /// A snapshot of the streams currently in the pool and not marked for deletion.
    pub fn unmarked(&self) -> Vec<Arc<Stream>> {
        self.read()
            .iter()
            .filter(|stream| !stream.is_marked())
            .cloned()
            .collect()
    }

    /// Whether a stream with `id` is in the pool.
    pub fn contains(&self, id: StreamId) -> bool {
        self.read().iter().any(|stream| stream.id() == id)
    }

    /// A count of the streams in the pool, marked or not.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Some stream in the pool, chosen uniformly.
    pub fn sample(&self, rng: &mut impl rand::Rng) -> Option<Arc<Stream>> {
        self.read().choose(rng).cloned()
    }

    /// Removes each marked stream from the pool, returning the id and reason of each.
    pub fn remove_marked(&self) -> Vec<(StreamId, DeletionReason)> {
        let mut removed = Vec::default();
        self.write().retain(|stream| match stream.mark_reason() {
            Some(reason) => {
                removed.push((stream.id(), reason));
                false
            }
            None => true,
        });
        removed
    }

    /// Removes the streams with the given ids from the pool, regardless of any mark.
    pub fn remove(&self, ids: &[StreamId]) {
        self.write().retain(|stream| !ids.contains(&stream.id()));
    }

    /// Marks every stream in the pool, returning a count of streams freshly marked.
    pub fn mark_all(&self, reason: DeletionReason) -> usize {
        self.read()
            .iter()
            .filter(|stream| stream.mark(reason))
            .count()
    }

    /// Removes every stream from the pool.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// The literals common to every stream in the pool, or None if the pool is empty.
    pub fn intersection(&self) -> Option<Assignment> {
        let streams = self.streams();
        let (first, rest) = streams.split_first()?;
        let mut common = first.snapshot();
        for stream in rest {
            stream.with_assignment(|assignment| common.intersect_with(assignment));
            if common.is_empty() {
                break;
            }
        }
        Some(common)
    }

    /// An unmarked stream with the fewest literals, if any.
    pub fn smallest(&self) -> Option<Arc<Stream>> {
        self.unmarked().into_iter().min_by_key(|stream| stream.len())
    }

    /// An unmarked stream with the most literals, if any.
    pub fn largest(&self) -> Option<Arc<Stream>> {
        self.unmarked().into_iter().max_by_key(|stream| stream.len())
    }
}
