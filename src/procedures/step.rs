/*!
A step of the orchestrator on a single stream.

# Overview

A step on a stream:

1. Checks whether the stream is complete.
   A stream which assigns every atom completes the search if the stream is a model of the formula, and is marked otherwise.
2. Makes [lookahead](crate::procedures::lookahead) on up to some count of windows of unassigned atoms, in turn, each against the assignment as grown by the windows before:
   - If momentum is kept and the last window to grow the stream still has unassigned atoms, the window is taken again. Otherwise, a fresh window is taken from the ordering.
   - If no valuation of the window is consistent with the stream, the stream is marked.
   - If the stream grows, the grown assignment is checked for consistency, and then checked by the oracle of the orchestrator with the short time limit.
     An inconsistent assignment, or an assignment the oracle finds unsatisfiable, is marked.
     A model found by the oracle completes the search.
     Otherwise, the stream is replaced by the grown assignment, and the step continues unless the assignment is now full.
   - If the stream does not grow, momentum is lost.

The orchestrator is the only writer of stream assignments, and so a snapshot taken during a step is current until the step next replaces the stream.
*/

use std::sync::Arc;

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
    structures::{assignment::Assignment, atom::Atom},
};

/// The result of a step on a stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The stream grew by some count of literals.
    Grown(usize),

    /// Lookahead forced nothing, or the oracle found nothing.
    Stalled,

    /// The stream was marked for deletion, by this step or earlier.
    Marked(DeletionReason),

    /// The search was completed.
    Completed,
}

impl<O: Oracle> GenericContext<O> {
    /// A step on `stream`, with lookahead on at most `windows` windows.
    ///
    /// If `momentum` is false, only fresh windows are taken.
    ///
    /// For details, see [procedures::step](crate::procedures::step).
    pub fn step_stream(&mut self, stream: &Arc<Stream>, windows: usize, momentum: bool) -> Step {
        if let Some(reason) = stream.mark_reason() {
            return Step::Marked(reason);
        }

        let mut assignment = stream.snapshot();

        if !assignment.is_consistent() {
            self.mark_stream(stream, DeletionReason::LocalConflict);
            return Step::Marked(DeletionReason::LocalConflict);
        }

        if self.formula.is_full(&assignment) {
            return self.complete_stream(stream, assignment);
        }

        let id = stream.id();
        let size = self.config.window_size.value;
        let mut total = 0;

        for _ in 0..windows {
            let kept = match momentum {
                true => self.momentum.get(&id).map(|previous| {
                    previous
                        .iter()
                        .copied()
                        .filter(|atom| !assignment.is_assigned(*atom))
                        .collect::<Vec<Atom>>()
                }),
                false => None,
            };
            let window = match kept {
                Some(kept) if !kept.is_empty() => kept,
                _ => self.ordering.window(&assignment, size, &mut self.rng),
            };

            if window.is_empty() {
                break;
            }

            match self
                .clause_db
                .ranged_propagation(&assignment, &window, &mut self.rng)
            {
                None => {
                    log::trace!(target: targets::LOOKAHEAD, "Stream {id} contradicted on {window:?}");
                    self.momentum.remove(&id);
                    self.mark_stream(stream, DeletionReason::LocalUnsat);
                    return Step::Marked(DeletionReason::LocalUnsat);
                }

                Some(grown) if grown.len() > assignment.len() => {
                    self.momentum.insert(id, window);
                    match self.accept_growth(stream, &assignment, grown) {
                        Step::Grown(forced) => total += forced,
                        other => return other,
                    }

                    assignment = stream.snapshot();
                    if self.formula.is_full(&assignment) {
                        return self.complete_stream(stream, assignment);
                    }
                }

                Some(_) => {
                    self.momentum.remove(&id);
                }
            }
        }

        match total {
            0 => Step::Stalled,
            forced => Step::Grown(forced),
        }
    }

    /// Checks `grown`, the growth of the stream from `assignment`, and replaces the stream if the checks pass.
    fn accept_growth(&mut self, stream: &Arc<Stream>, assignment: &Assignment, grown: Assignment) -> Step {
        if !grown.is_consistent() {
            self.mark_stream(stream, DeletionReason::LocalConflict);
            return Step::Marked(DeletionReason::LocalConflict);
        }

        self.counters.oracle_calls += 1;
        match self.oracle.solve_given(&grown) {
            OracleReport::Unsatisfiable => {
                self.mark_stream(stream, DeletionReason::OracleUnsat);
                Step::Marked(DeletionReason::OracleUnsat)
            }

            OracleReport::Satisfiable(model) if self.formula.satisfied_by(&model) => {
                log::info!(target: targets::ORACLE, "Model found from stream {}", stream.id());
                match self
                    .completion
                    .claim(Outcome::Satisfiable(model), Claimant::Orchestrator)
                {
                    true => Step::Completed,
                    false => Step::Stalled,
                }
            }

            OracleReport::Satisfiable(_) | OracleReport::Unknown => {
                let forced = grown.len() - assignment.len();
                stream.replace(grown);
                self.counters.propagations += 1;
                self.counters.forced += forced;

                let id = stream.id();
                log::trace!(target: targets::LOOKAHEAD, "Stream {id} grew by {forced}");
                self.dispatch(|| Dispatch::Delta(Delta::Pool(delta::Pool::Propagated { id, forced })));
                Step::Grown(forced)
            }
        }
    }

    /// Completes the search with the full assignment of `stream`, if a model, and marks the stream otherwise.
    fn complete_stream(&mut self, stream: &Arc<Stream>, assignment: Assignment) -> Step {
        match self.formula.satisfied_by(&assignment) {
            true => {
                log::info!(target: targets::POOL, "Stream {} is a model", stream.id());
                match self
                    .completion
                    .claim(Outcome::Satisfiable(assignment), Claimant::Orchestrator)
                {
                    true => Step::Completed,
                    false => Step::Stalled,
                }
            }

            false => {
                self.mark_stream(stream, DeletionReason::FullInconsistent);
                Step::Marked(DeletionReason::FullInconsistent)
            }
        }
    }
}
