use std::{
    sync::{atomic::AtomicBool, Arc},
    time::Instant,
};

use fnv::FnvHashMap;
use rand_core::SeedableRng;

use crate::{
    checkpoint::CheckpointStore,
    config::Config,
    db::clause::ClauseDB,
    dispatch::{self, library::stat::RateTable, Dispatch, Dispatcher},
    generic::minimal_pcg::MinimalPCG32,
    oracle::Oracle,
    pool::{StreamId, StreamPool},
    procedures::ordering::VariableOrdering,
    reports::Report,
    structures::{assignment::Assignment, atom::Atom, formula::Formula},
    types::err::ErrorKind,
};

use super::{completion::Completion, Counters};

/// The interval at which per-minute rates are sampled.
const RATE_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60);

/// A generic context, parameratised to an exact oracle.
///
/// # Example
///
/// ```rust
/// # use stream_sat::context::GenericContext;
/// # use stream_sat::oracle::cdcl::CdclOracle;
/// # use stream_sat::config::Config;
/// # use stream_sat::structures::formula::Formula;
/// let formula = Formula::from_clauses(vec![vec![1, 2]]);
/// let context = GenericContext::<CdclOracle>::from_formula(Config::default(), formula, None);
/// assert_eq!(context.pool.len(), 0);
/// ```
pub struct GenericContext<O: Oracle> {
    /// The configuration of a context.
    pub config: Config,

    /// Counters related to a context/solve.
    pub counters: Counters,

    /// The formula of the context.
    pub formula: Arc<Formula>,

    /// The clause database.
    /// See [db::clause](crate::db::clause) for details.
    pub clause_db: Arc<ClauseDB>,

    /// The pool of streams.
    /// See [pool](crate::pool) for details.
    pub pool: Arc<StreamPool>,

    /// The closure of the unit clauses of the formula.
    pub root: Assignment,

    /// The literals common to every stream of the pool.
    pub init: Assignment,

    /// The ordering of atoms from which lookahead windows are taken.
    pub ordering: VariableOrdering,

    /// Completion of the search.
    pub completion: Arc<Completion>,

    /// The source of rng.
    pub rng: MinimalPCG32,

    /// The oracle of the orchestrator.
    pub oracle: O,

    /// Where checkpoints are written to and read from, if checkpoints are enabled.
    pub checkpoints: Option<CheckpointStore>,

    /// Rates of various counters, sampled during a solve.
    pub rates: RateTable,

    /// Receives dispatches, if present.
    pub(crate) dispatcher: Option<Dispatcher>,

    /// Raised to stop verifier threads at the end of a solve.
    pub(crate) halt: Arc<AtomicBool>,

    /// The last window which grew each stream.
    pub(crate) momentum: FnvHashMap<StreamId, Vec<Atom>>,

    /// The time at which a checkpoint was last written, or the solve began.
    pub(crate) last_checkpoint: Instant,
}

impl<O: Oracle> GenericContext<O> {
    /// Creates a context for `formula` from some given configuration, sending dispatches to `dispatcher` if given.
    pub fn from_formula(config: Config, formula: Formula, dispatcher: Option<Dispatcher>) -> Self {
        let clause_db = ClauseDB::from_formula(&formula);
        let root = clause_db.closure(&Assignment::default(), formula.units().iter().copied());

        let completion = Arc::new(Completion::default());

        let mut oracle = O::from_formula(&formula, Some(config.inline_time_limit.value));
        let oracle_completion = completion.clone();
        oracle.set_callback_terminate(Box::new(move || oracle_completion.is_complete()));

        let checkpoints = match config.checkpoints.value {
            true => Some(CheckpointStore::new(
                &config.checkpoint_directory,
                &formula.hash_string(),
            )),
            false => None,
        };

        Self {
            ordering: VariableOrdering::new(formula.atoms(), config.ordering_cooldown.value),
            rng: MinimalPCG32::from_seed(config.seed.value.to_le_bytes()),
            rates: RateTable::standard(RATE_INTERVAL),

            config,
            counters: Counters::default(),

            formula: Arc::new(formula),
            clause_db: Arc::new(clause_db),
            pool: Arc::new(StreamPool::default()),

            init: root.clone(),
            root,

            completion,
            oracle,
            checkpoints,

            dispatcher,
            halt: Arc::new(AtomicBool::new(false)),
            momentum: FnvHashMap::default(),
            last_checkpoint: Instant::now(),
        }
    }

    /// A report on the state of the context.
    pub fn report(&self) -> Report {
        self.completion.report()
    }

    /// The model found by a solve.
    ///
    /// Returns [InvalidState](ErrorKind::InvalidState) if no model has been found.
    pub fn model(&self) -> Result<Assignment, ErrorKind> {
        self.completion.model().cloned().ok_or(ErrorKind::InvalidState)
    }

    /// The model found by a solve as a string of DIMACS literals.
    pub fn valuation_string(&self) -> Result<String, ErrorKind> {
        Ok(self.model()?.valuation_string())
    }

    /// Sends the dispatch built by `make`, if some dispatcher is present.
    pub(crate) fn dispatch(&self, make: impl FnOnce() -> Dispatch) {
        dispatch::send(&self.dispatcher, make)
    }

    /// A clone of the dispatcher of the context, if any.
    pub(crate) fn dispatcher(&self) -> Option<Dispatcher> {
        self.dispatcher.clone()
    }
}
