/*!
Background verifier threads.

Each verifier thread holds an oracle of its own, and repeatedly:
1. Samples a stream of the pool, uniformly.
   If the pool is empty, or the stream is marked, the thread idles briefly.
2. Asks the oracle whether the formula is satisfiable together with a snapshot of the stream, within the time limit of the thread.
   - If not, the stream is marked.
   - If so, the model completes the search, if no other thread has completed the search first.
   - If unknown, nothing follows.

Verifiers are either *fast*, with a short time limit, or *slow*, with a long time limit.

A verifier stops once the search is complete, or the orchestrator raises the halt flag at the end of a solve.
The oracle of each verifier polls the same conditions, so a call in progress returns promptly.

Each oracle call is made within [catch_unwind](std::panic::catch_unwind).
A panic is treated as an unknown result, and the oracle of the thread is rebuilt.
*/

use std::{
    panic::{self, AssertUnwindSafe},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use rand_core::SeedableRng;

use crate::{
    context::completion::{Claimant, Completion, Outcome},
    dispatch::{
        self,
        library::delta::{self, Delta},
        Dispatch, Dispatcher,
    },
    generic::minimal_pcg::MinimalPCG32,
    misc::log::targets::{self},
    oracle::{Oracle, OracleReport},
    pool::{DeletionReason, StreamPool},
    structures::formula::Formula,
};

/// How long a verifier idles when no unmarked stream is sampled.
pub const IDLE: Duration = Duration::from_millis(100);

/// The kind of a verifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerifierKind {
    /// A short time limit, and typically many threads.
    Fast,

    /// A long time limit, and typically few threads.
    Slow,
}

impl std::fmt::Display for VerifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fast => write!(f, "fast"),
            Self::Slow => write!(f, "slow"),
        }
    }
}

/// The state shared between the orchestrator and each verifier.
#[derive(Clone)]
pub struct Shared {
    pub formula: Arc<Formula>,
    pub pool: Arc<StreamPool>,
    pub completion: Arc<Completion>,
    pub halt: Arc<AtomicBool>,
    pub dispatcher: Option<Dispatcher>,
}

impl Shared {
    /// Whether the verifier should stop.
    fn is_stopped(&self) -> bool {
        self.completion.is_complete() || self.halt.load(Ordering::Relaxed)
    }
}

/// Counts of the outcomes of the calls of a verifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VerifierCounts {
    pub calls: usize,
    pub marks: usize,
    pub unknowns: usize,
    pub panics: usize,
}

/// A verifier, to be run on a thread of its own.
pub struct Verifier<O: Oracle> {
    index: usize,
    kind: VerifierKind,
    time_limit: Duration,
    oracle: O,
    shared: Shared,
    rng: MinimalPCG32,
    counts: VerifierCounts,
}

impl<O: Oracle> Verifier<O> {
    /// A verifier, with an oracle built for the formula of `shared`.
    pub fn new(index: usize, kind: VerifierKind, time_limit: Duration, seed: u64, shared: Shared) -> Self {
        Verifier {
            oracle: build_oracle(&shared, time_limit),
            rng: MinimalPCG32::from_seed(seed.to_le_bytes()),
            counts: VerifierCounts::default(),
            index,
            kind,
            time_limit,
            shared,
        }
    }

    /// Runs the verifier until the search is complete or halted, returning counts of the outcomes of calls.
    pub fn run(mut self) -> VerifierCounts {
        log::debug!(target: targets::VERIFIER, "Verifier {} ({}) started", self.index, self.kind);

        while !self.shared.is_stopped() {
            let Some(stream) = self.shared.pool.sample(&mut self.rng) else {
                thread::sleep(IDLE);
                continue;
            };
            if stream.is_marked() {
                thread::sleep(IDLE);
                continue;
            }

            let assumptions = stream.snapshot();
            let oracle = &mut self.oracle;
            let result = panic::catch_unwind(AssertUnwindSafe(|| oracle.solve_given(&assumptions)));
            self.counts.calls += 1;

            match result {
                Ok(OracleReport::Unsatisfiable) => {
                    if stream.mark(DeletionReason::OracleUnsat) {
                        self.counts.marks += 1;
                        let id = stream.id();
                        log::trace!(target: targets::VERIFIER, "Verifier {} marked stream {id}", self.index);
                        dispatch::send(&self.shared.dispatcher, || {
                            Dispatch::Delta(Delta::Pool(delta::Pool::Marked {
                                id,
                                reason: DeletionReason::OracleUnsat,
                            }))
                        });
                    }
                }

                Ok(OracleReport::Satisfiable(model)) => {
                    if !self.shared.formula.satisfied_by(&model) {
                        log::warn!(target: targets::VERIFIER, "Verifier {} found a model which is not a model", self.index);
                        continue;
                    }
                    if self
                        .shared
                        .completion
                        .claim(Outcome::Satisfiable(model), Claimant::Verifier(self.index))
                    {
                        log::info!(target: targets::VERIFIER, "Verifier {} found a model from stream {}", self.index, stream.id());
                    }
                    break;
                }

                Ok(OracleReport::Unknown) => self.counts.unknowns += 1,

                Err(_) => {
                    self.counts.panics += 1;
                    log::warn!(target: targets::VERIFIER, "Verifier {} recovered from a panic", self.index);
                    self.oracle = build_oracle(&self.shared, self.time_limit);
                }
            }
        }

        log::debug!(target: targets::VERIFIER, "Verifier {} stopped after {} calls", self.index, self.counts.calls);
        self.counts
    }
}

/// An oracle for the formula of `shared`, which terminates once the verifier should stop.
fn build_oracle<O: Oracle>(shared: &Shared, time_limit: Duration) -> O {
    let mut oracle = O::from_formula(&shared.formula, Some(time_limit));
    let stop = shared.clone();
    oracle.set_callback_terminate(Box::new(move || stop.is_stopped()));
    oracle
}
