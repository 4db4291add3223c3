//! Writing and restoring checkpoints of the pool of a context.
//!
//! For the layout of a checkpoint, see [checkpoint](crate::checkpoint).
//!
//! Failures are recovered from:
//! - If a checkpoint cannot be read, the search begins from the root assignment.
//! - If a checkpoint cannot be written, the search continues, and a checkpoint is attempted again after the checkpoint interval.

use std::time::Instant;

use crate::{
    context::GenericContext,
    dispatch::{
        library::{
            delta::{self, Delta},
            report::{self, Report},
        },
        Dispatch,
    },
    misc::log::targets::{self},
    oracle::Oracle,
    pool::StreamId,
    structures::{assignment::Assignment, literal::Literal},
};

impl<O: Oracle> GenericContext<O> {
    /// Writes a checkpoint of the unmarked streams of the pool, together with their intersection, returning true on success.
    ///
    /// Returns false if checkpoints are disabled.
    pub fn save_checkpoint(&mut self) -> bool {
        let Some(store) = &self.checkpoints else {
            return false;
        };
        self.last_checkpoint = Instant::now();

        let streams = self
            .pool
            .unmarked()
            .iter()
            .map(|stream| (stream.id(), stream.snapshot()))
            .collect::<Vec<(StreamId, Assignment)>>();

        // The global assignment written is that of the streams written, as the pool may have moved since it was last recomputed.
        let mut saved = streams.iter().map(|(_, assignment)| assignment);
        let solution = match saved.next() {
            Some(first) => saved.fold(first.clone(), |mut common, assignment| {
                common.intersect_with(assignment);
                common
            }),
            None => self.init.clone(),
        };

        match store.save(&streams, &solution) {
            Ok(()) => {
                self.counters.checkpoints += 1;
                let directory = store.directory().to_path_buf();
                log::info!(target: targets::CHECKPOINT, "Checkpoint of {} streams written", streams.len());
                self.dispatch(|| {
                    Dispatch::Report(Report::Checkpoint(report::Checkpoint::Saved {
                        streams: streams.len(),
                        directory,
                    }))
                });
                true
            }

            Err(e) => {
                log::warn!(target: targets::CHECKPOINT, "Checkpoint failed: {e}");
                self.dispatch(|| Dispatch::Report(Report::Checkpoint(report::Checkpoint::Failed(e.to_string()))));
                false
            }
        }
    }

    /// Writes a checkpoint if checkpoints are enabled and the checkpoint interval has passed.
    pub fn checkpoint_if_due(&mut self) {
        if self.checkpoints.is_some()
            && self.last_checkpoint.elapsed() >= self.config.checkpoint_interval.value
        {
            self.save_checkpoint();
        }
    }

    /// Restores the pool from a checkpoint, returning true if some stream was restored.
    ///
    /// Literals on atoms outside the formula are dropped, and each restored stream is extended with the root assignment.
    pub fn restore_checkpoint(&mut self) -> bool {
        let Some(store) = &self.checkpoints else {
            return false;
        };

        let loaded = match store.load() {
            Ok(Some(loaded)) => loaded,
            Ok(None) => return false,
            Err(e) => {
                log::warn!(target: targets::CHECKPOINT, "Checkpoint unreadable, starting afresh: {e}");
                self.dispatch(|| Dispatch::Report(Report::Checkpoint(report::Checkpoint::Failed(e.to_string()))));
                return false;
            }
        };
        let directory = store.directory().to_path_buf();

        for (id, assignment) in &loaded.streams {
            let mut restored = assignment
                .literals()
                .filter(|literal| self.formula.has_atom(literal.atom()))
                .collect::<Assignment>();
            restored.extend(self.root.literals());

            let id = *id;
            self.pool.restore(id, restored);
            self.dispatch(|| Dispatch::Delta(Delta::Pool(delta::Pool::Seeded(id))));
        }

        let streams = loaded.streams.len();
        if streams == 0 {
            return false;
        }

        if let Some(solution) = &loaded.solution {
            log::debug!(target: targets::CHECKPOINT, "Checkpoint global assignment of {} literals", solution.len());
        }
        log::info!(target: targets::CHECKPOINT, "Restored {streams} streams from {directory:?}");
        self.dispatch(|| Dispatch::Report(Report::Checkpoint(report::Checkpoint::Loaded { streams, directory })));
        true
    }
}
