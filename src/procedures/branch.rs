/*!
Branching, a binary split of the smallest stream.

The smallest stream of the pool is split on the first atom of the [ordering](crate::procedures::ordering) it leaves unassigned:
- A fresh stream is added, holding the closure of the source with the atom true.
- The source is replaced by the closure of the source with the atom false.

Either half is marked if the closure is inconsistent.

Together, the two halves cover every model which extends the source, and so the pool itself is the frontier of the search, rather than some explicit tree.
*/

use crate::{
    context::GenericContext,
    dispatch::{
        library::delta::{self, Delta},
        Dispatch,
    },
    misc::log::targets::{self},
    oracle::Oracle,
    pool::{DeletionReason, StreamId},
    structures::literal::{CLiteral, Literal},
};

impl<O: Oracle> GenericContext<O> {
    /// Splits the smallest stream of the pool, returning the id of the fresh stream.
    ///
    /// Returns None if the pool has no unmarked stream, or if the smallest stream assigns every atom.
    pub fn branch_smallest(&mut self) -> Option<StreamId> {
        let source = self.pool.smallest()?;
        let assignment = source.snapshot();

        let atom = self
            .ordering
            .order()
            .iter()
            .copied()
            .find(|atom| !assignment.is_assigned(*atom))?;

        let positive = self
            .clause_db
            .closure(&assignment, [CLiteral::new(atom, true)]);
        let negative = self
            .clause_db
            .closure(&assignment, [CLiteral::new(atom, false)]);

        let (positive_ok, negative_ok) = (positive.is_consistent(), negative.is_consistent());

        let child = self.pool.add(positive);
        source.replace(negative);
        self.momentum.remove(&source.id());
        self.counters.additions += 1;

        let (from, into) = (source.id(), child.id());
        log::trace!(target: targets::BRANCH, "Stream {from} split on {atom} into {into}");
        self.dispatch(|| Dispatch::Delta(Delta::Pool(delta::Pool::Branched { from, into, atom })));

        if !positive_ok {
            self.mark_stream(&child, DeletionReason::LocalConflict);
        }
        if !negative_ok {
            self.mark_stream(&source, DeletionReason::LocalConflict);
        }

        Some(into)
    }
}
