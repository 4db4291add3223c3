/*!
Lazy deletion of streams.

Streams are deleted in two steps:
1. A stream is [marked](crate::pool::Stream::mark) with a [reason](DeletionReason), by the orchestrator or by a verifier thread.
2. Marked streams are removed from the pool by the orchestrator on the next [sweep](GenericContext::sweep_marked), and the global assignment is recomputed as the intersection of the remaining streams.

# Exhaustion

If every stream is removed, the intersection is undefined.

Every mark refutes the assignment of the marked stream, and every stream extends the root assignment, so an empty pool is strong evidence the formula is unsatisfiable.
Still, lookahead is not a certificate, and so on exhaustion the oracle of the orchestrator is called on the root assignment with the long time limit:
- If the root assignment is unsatisfiable, so is the formula.
- If the oracle finds a model, the model completes the search.
- Otherwise, the pool is reseeded with a single stream holding the root assignment, and the global assignment is reset to the root assignment.
*/

use crate::{
    context::{
        completion::{Claimant, Outcome},
        GenericContext,
    },
    dispatch::{
        library::delta::{self, Delta},
        Dispatch,
    },
    misc::log::targets::{self},
    oracle::{Oracle, OracleReport},
    pool::{DeletionReason, Stream},
};

impl<O: Oracle> GenericContext<O> {
    /// Marks `stream` for deletion, noting the mark if the stream was not already marked.
    pub fn mark_stream(&self, stream: &Stream, reason: DeletionReason) {
        if stream.mark(reason) {
            log::trace!(target: targets::DELETION, "Stream {} marked: {reason}", stream.id());
            let id = stream.id();
            self.dispatch(|| Dispatch::Delta(Delta::Pool(delta::Pool::Marked { id, reason })));
        }
    }

    /// Removes every marked stream from the pool, and recomputes the global assignment if some stream was removed.
    ///
    /// Returns a count of the streams removed.
    pub fn sweep_marked(&mut self) -> usize {
        let removed = self.pool.remove_marked();

        for (id, reason) in &removed {
            self.counters.deletions += 1;
            self.momentum.remove(id);
            log::trace!(target: targets::DELETION, "Stream {id} removed: {reason}");
            let (id, reason) = (*id, *reason);
            self.dispatch(|| Dispatch::Delta(Delta::Pool(delta::Pool::Removed { id, reason })));
        }

        if !removed.is_empty() {
            self.recompute_global();
        }

        removed.len()
    }

    /// Recomputes the global assignment as the intersection of every stream of the pool.
    ///
    /// If the pool is empty the global assignment is left as is, and exhaustion is expected to be handled.
    pub fn recompute_global(&mut self) {
        if let Some(common) = self.pool.intersection() {
            let size = common.len();
            self.init = common;
            self.dispatch(|| Dispatch::Delta(Delta::Global(delta::Global::Recomputed { size })));
        }
    }

    /// Handles exhaustion of the pool.
    ///
    /// For details, see [procedures::deletion](crate::procedures::deletion).
    pub fn handle_exhaustion(&mut self) {
        log::info!(target: targets::POOL, "Pool exhausted, calling the oracle on the root assignment");

        if !self.root.is_consistent() {
            self.completion.claim(Outcome::Unsatisfiable, Claimant::Exhaustion);
            return;
        }

        self.counters.oracle_calls += 1;
        self.oracle
            .set_time_limit(Some(self.config.slow_time_limit.value));
        let report = self.oracle.solve_given(&self.root);
        self.oracle
            .set_time_limit(Some(self.config.inline_time_limit.value));

        match report {
            OracleReport::Unsatisfiable => {
                log::info!(target: targets::POOL, "Root assignment unsatisfiable");
                self.completion.claim(Outcome::Unsatisfiable, Claimant::Exhaustion);
            }

            OracleReport::Satisfiable(model) if self.formula.satisfied_by(&model) => {
                log::info!(target: targets::POOL, "Model found on exhaustion");
                self.completion
                    .claim(Outcome::Satisfiable(model), Claimant::Exhaustion);
            }

            OracleReport::Satisfiable(_) | OracleReport::Unknown => {
                if self.completion.is_complete() {
                    return;
                }
                self.reseed();
            }
        }
    }

    /// Reseeds the pool with a single stream holding the root assignment.
    pub fn reseed(&mut self) {
        let stream = self.pool.add(self.root.clone());
        self.init = self.root.clone();
        self.counters.reseeds += 1;

        let id = stream.id();
        log::info!(target: targets::POOL, "Pool reseeded with stream {id}");
        self.dispatch(|| Dispatch::Delta(Delta::Pool(delta::Pool::Reseeded(id))));
    }
}
