/*!
Global propagation, and broadcast of the result to every stream.

Once each pass, [lookahead](crate::procedures::lookahead) is made on the global assignment with a fresh window.

- If no valuation of the window is consistent with the global assignment, then as every stream contains the global assignment, no valuation of the window is consistent with any stream, and every stream is marked.
- If lookahead forces some literals, the literals are added to the global assignment, and each stream is closed with the literals.
  Any stream which becomes inconsistent is marked.
*/

use crate::{
    context::GenericContext,
    dispatch::{
        library::delta::{self, Delta},
        Dispatch,
    },
    misc::log::targets::{self},
    oracle::Oracle,
    pool::DeletionReason,
    structures::literal::CLiteral,
};

impl<O: Oracle> GenericContext<O> {
    /// Lookahead on the global assignment, broadcasting any forced literals to every stream.
    ///
    /// Returns the literals forced.
    pub fn global_propagation(&mut self) -> usize {
        if !self.init.is_consistent() {
            let marked = self.pool.mark_all(DeletionReason::LocalConflict);
            log::debug!(target: targets::LOOKAHEAD, "Global assignment inconsistent, {marked} streams marked");
            return 0;
        }

        let window = self.ordering.window(
            &self.init,
            self.config.window_size.value,
            &mut self.rng,
        );
        if window.is_empty() {
            return 0;
        }

        match self
            .clause_db
            .ranged_propagation(&self.init, &window, &mut self.rng)
        {
            None => {
                let marked = self.pool.mark_all(DeletionReason::LocalUnsat);
                log::debug!(target: targets::LOOKAHEAD, "Global contradiction on {window:?}, {marked} streams marked");
                self.dispatch(|| Dispatch::Delta(Delta::Global(delta::Global::Contradiction)));
                0
            }

            Some(grown) if grown.len() > self.init.len() => {
                let forced = grown.difference(&self.init);
                self.init = grown;
                self.broadcast(&forced);
                forced.len()
            }

            Some(_) => 0,
        }
    }

    /// Closes every unmarked stream of the pool with `literals`, marking any stream which becomes inconsistent.
    pub fn broadcast(&mut self, literals: &[CLiteral]) {
        self.counters.broadcasts += 1;
        log::trace!(target: targets::LOOKAHEAD, "Broadcast of {literals:?}");

        for stream in self.pool.unmarked() {
            let mut assignment = stream.snapshot();
            self.clause_db.close(&mut assignment, literals.iter().copied());
            match assignment.is_consistent() {
                true => stream.replace(assignment),
                false => self.mark_stream(&stream, DeletionReason::LocalConflict),
            }
        }

        let literals = literals.to_vec();
        self.dispatch(|| Dispatch::Delta(Delta::Global(delta::Global::Broadcast(literals))));
    }
}
