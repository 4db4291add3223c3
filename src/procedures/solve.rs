//! Searches for a model of the formula in a context.
//!
//! # Overview
//!
//! A solve is driven by the orchestrator, on the thread of the caller, while verifier threads race against the orchestrator in the background.
//!
//! Before the search:
//! - If the formula contains an empty clause, or the root assignment is inconsistent, the formula is unsatisfiable.
//! - The pool is seeded, from a checkpoint if one exists and checkpoints are enabled, and with a single stream holding the root assignment otherwise.
//! - [Verifier threads](crate::procedures::verifier) are spawned, fast and slow.
//!
//! The search is then a loop of [passes](GenericContext::pass) until completion is claimed, or the time limit of the config expires.
//!
//! Each pass:
//! 1. [Sweeps](crate::procedures::deletion) marked streams from the pool, handling exhaustion of the pool if every stream was removed.
//! 2. [Merges](crate::procedures::merge) streams which agree on much, and [refreshes](crate::procedures::ordering) the variable ordering if due.
//! 3. Takes a [step](crate::procedures::step) on each unmarked stream, in random order. After each step:
//!    - An extra step is taken on the smallest stream, with a fresh window.
//!    - The smallest stream is [split](crate::procedures::branch) with some probability.
//! 4. Makes [lookahead on the global assignment](crate::procedures::broadcast), and checks whether the global assignment completes the search.
//! 5. Writes a checkpoint, if due.
//!
//! Roughly, the loop is as diagrammed:
//!
//! ```none
//!              +-------+     +-------+     +------------------------------+
//! -- seed -->  | sweep |---->| merge |---->| step each stream, and branch |
//!     ⌃        +-------+     +-------+     +------------------------------+
//!     |            |                                      |
//!     | exhausted  |                                      ⌄
//!     +------------+                         +-------------------------+
//!                  ⌃                         | global lookahead        |
//!                  +-------------------------| checkpoint, if due      |
//!                                            +-------------------------+
//! ```
//!
//! After the search, verifier threads are halted and joined.
//! On a model, the pool is replaced by a single stream holding the model, and a final checkpoint is written.
//! On expiry of the time limit, a checkpoint is written so the search may be resumed.
//!
//! # Example
//!
//! ```rust
//! # use stream_sat::config::Config;
//! # use stream_sat::context::Context;
//! # use stream_sat::reports::Report;
//! # use stream_sat::structures::formula::Formula;
//! let mut config = Config::default();
//! config.fast_verifiers.value = 0;
//! config.slow_verifiers.value = 0;
//!
//! let formula = Formula::from_clauses(vec![vec![1], vec![-1]]);
//! let mut the_context = Context::from_formula(config.clone(), formula, None);
//! assert_eq!(the_context.solve(), Ok(Report::Unsatisfiable));
//!
//! let formula = Formula::from_clauses(vec![vec![1, 2], vec![-1, 2], vec![-2, 3]]);
//! let mut the_context = Context::from_formula(config, formula, None);
//! assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
//! assert!(the_context.model().is_ok_and(|model| model.contains(2) && model.contains(3)));
//! ```

use std::{
    sync::atomic::Ordering,
    thread::{self, JoinHandle},
    time::Instant,
};

use rand::{seq::SliceRandom, Rng, RngCore};

use crate::{
    context::{
        completion::{Claimant, Outcome},
        GenericContext,
    },
    dispatch::{
        library::{
            delta::{self, Delta},
            report::{self, Report as DispatchReport},
            stat::Stat,
        },
        Dispatch,
    },
    misc::log::targets::{self},
    oracle::Oracle,
    procedures::{
        step::Step,
        verifier::{Shared, Verifier, VerifierCounts, VerifierKind},
    },
    reports::Report,
    structures::assignment::Assignment,
    types::err::ErrorKind,
};

/// The count of windows tried on each stream step.
pub const STREAM_WINDOWS: usize = 2;

impl<O: Oracle + 'static> GenericContext<O> {
    /// Searches for a model of the formula, returning a report of the outcome.
    ///
    /// For details, see [procedures::solve](crate::procedures::solve).
    pub fn solve(&mut self) -> Result<Report, ErrorKind> {
        let start = Instant::now();

        if self.completion.is_complete() {
            return Ok(self.report());
        }

        if self.formula.has_empty_clause() || !self.root.is_consistent() {
            log::info!(target: targets::POOL, "Root assignment inconsistent");
            self.completion.claim(Outcome::Unsatisfiable, Claimant::Exhaustion);
            return Ok(self.conclude(start, false));
        }

        if self.formula.atom_count() == 0 {
            self.completion
                .claim(Outcome::Satisfiable(Assignment::default()), Claimant::Exhaustion);
            return Ok(self.conclude(start, false));
        }

        self.seed_pool();
        self.recompute_global();
        self.check_global_completion();

        self.halt.store(false, Ordering::Relaxed);
        self.last_checkpoint = Instant::now();
        let verifiers = self.spawn_verifiers();

        let deadline = self.config.search_limit().map(|limit| start + limit);
        let mut time_up = false;

        while !self.completion.is_complete() {
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                time_up = true;
                break;
            }
            self.pass(deadline);
        }

        self.halt.store(true, Ordering::Relaxed);
        for handle in verifiers {
            match handle.join() {
                Ok(counts) => log::debug!(target: targets::VERIFIER, "Verifier joined with {counts:?}"),
                Err(_) => log::warn!(target: targets::VERIFIER, "Verifier thread panicked"),
            }
        }

        Ok(self.conclude(start, time_up))
    }

    /// Notes the outcome of a solve, returning a report of the outcome.
    fn conclude(&mut self, start: Instant, time_up: bool) -> Report {
        self.counters.time += start.elapsed();

        let solve_report = match self.completion.report() {
            Report::Satisfiable => {
                if let Some(model) = self.completion.model().cloned() {
                    self.pool.clear();
                    self.momentum.clear();
                    self.pool.add(model.clone());
                    self.init = model;
                    self.save_checkpoint();
                }
                report::Solve::Satisfiable
            }

            Report::Unsatisfiable => report::Solve::Unsatisfiable,

            Report::Unknown => {
                self.save_checkpoint();
                match time_up {
                    true => report::Solve::TimeUp,
                    false => report::Solve::Unknown,
                }
            }
        };

        log::info!(target: targets::POOL, "Solve concluded: {solve_report}");
        self.dispatch(|| Dispatch::Report(DispatchReport::Solve(solve_report)));
        self.dispatch(|| Dispatch::Report(DispatchReport::Finish));

        self.completion.report()
    }

    /// Seeds an empty pool, from a checkpoint if possible, and with the root assignment otherwise.
    fn seed_pool(&mut self) {
        if !self.pool.is_empty() || self.restore_checkpoint() {
            return;
        }

        let stream = self.pool.add(self.root.clone());
        let id = stream.id();
        log::debug!(target: targets::POOL, "Pool seeded with stream {id}");
        self.dispatch(|| Dispatch::Delta(Delta::Pool(delta::Pool::Seeded(id))));
    }

    /// Spawns each verifier thread of the config.
    ///
    /// A verifier which fails to spawn is skipped.
    fn spawn_verifiers(&mut self) -> Vec<JoinHandle<VerifierCounts>> {
        let shared = Shared {
            formula: self.formula.clone(),
            pool: self.pool.clone(),
            completion: self.completion.clone(),
            halt: self.halt.clone(),
            dispatcher: self.dispatcher(),
        };

        let fast = std::iter::repeat((VerifierKind::Fast, self.config.fast_time_limit.value))
            .take(self.config.fast_verifiers.value);
        let slow = std::iter::repeat((VerifierKind::Slow, self.config.slow_time_limit.value))
            .take(self.config.slow_verifiers.value);

        let mut handles = Vec::default();
        for (index, (kind, time_limit)) in fast.chain(slow).enumerate() {
            let seed = self.rng.next_u64().wrapping_add(index as u64);
            let shared = shared.clone();

            let spawned = thread::Builder::new()
                .name(format!("verifier-{index}"))
                .spawn(move || Verifier::<O>::new(index, kind, time_limit, seed, shared).run());

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => log::warn!(target: targets::VERIFIER, "Verifier {index} failed to spawn: {e}"),
            }
        }

        handles
    }
}

impl<O: Oracle> GenericContext<O> {
    /// A pass of the orchestrator over the pool, returning early on completion or on passing `deadline`.
    ///
    /// For details, see [procedures::solve](crate::procedures::solve).
    pub fn pass(&mut self, deadline: Option<Instant>) {
        self.counters.passes += 1;
        log::trace!(target: targets::POOL, "Pass {}", self.counters.passes);

        if self.sweep_and_check_exhaustion() {
            return;
        }

        self.merge_pass();
        self.refresh_ordering();

        let mut streams = self.pool.unmarked();
        streams.shuffle(&mut self.rng);

        for stream in streams {
            if self.completion.is_complete() || deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                return;
            }

            if self.sweep_and_check_exhaustion() {
                return;
            }
            if !self.pool.contains(stream.id()) {
                continue;
            }

            if self.step_stream(&stream, STREAM_WINDOWS, true) == Step::Completed {
                return;
            }

            if let Some(smallest) = self.pool.smallest() {
                if self.step_stream(&smallest, 1, false) == Step::Completed {
                    return;
                }
            }

            let branching_chance = self.config.branching_chance.value.clamp(0.0, 1.0);
            if self.rng.gen_bool(branching_chance) {
                self.branch_smallest();
            }

            self.sample_rates();
        }

        if self.sweep_and_check_exhaustion() {
            return;
        }

        self.global_propagation();
        self.check_global_completion();
        self.dispatch_progress();
        self.checkpoint_if_due();
    }

    /// Sweeps marked streams, and handles exhaustion of the pool.
    ///
    /// Returns true if the pool was exhausted.
    fn sweep_and_check_exhaustion(&mut self) -> bool {
        self.sweep_marked();
        match self.pool.is_empty() {
            true => {
                self.handle_exhaustion();
                true
            }
            false => false,
        }
    }

    /// Completes the search with the global assignment, if the global assignment is a model.
    pub fn check_global_completion(&mut self) {
        if self.formula.is_full(&self.init) && self.formula.satisfied_by(&self.init) {
            log::info!(target: targets::POOL, "Global assignment is a model");
            self.completion
                .claim(Outcome::Satisfiable(self.init.clone()), Claimant::Orchestrator);
        }
    }

    /// The progress of the search, as the size of the global assignment plus half the size of the smallest stream, relative to the count of atoms.
    pub fn progress(&self) -> f64 {
        let total = self.formula.atom_count();
        if total == 0 {
            return 1.0;
        }
        let solved = self.init.assigned_atom_count();
        let smallest = self.pool.smallest().map_or(0, |stream| stream.len());
        solved as f64 / total as f64 + (smallest as f64 / total as f64) / 2.0
    }

    fn dispatch_progress(&self) {
        let progress = self.progress();
        let solved = self.init.assigned_atom_count();
        let smallest = self.pool.smallest().map_or(0, |stream| stream.len());
        let total = self.formula.atom_count();
        let streams = self.pool.len();

        log::debug!(target: targets::POOL, "Progress {progress:.4} with {streams} streams, {solved} of {total} atoms settled");
        self.dispatch(|| {
            Dispatch::Stat(Stat::Progress {
                solved,
                smallest,
                total,
                streams,
                progress,
            })
        });
    }

    fn sample_rates(&mut self) {
        self.counters.solved = self.init.assigned_atom_count();
        for (name, per_minute) in self.rates.sweep(&self.counters, Instant::now()) {
            log::debug!(target: targets::POOL, "{name}: {per_minute:.2} per minute");
            self.dispatch(|| Dispatch::Stat(Stat::Rate { name, per_minute }));
        }
    }
}
