/*!
A conflict-driven clause-learning oracle.

[CdclOracle] is a compact CDCL solver, built around:
- Two watched literals for [propagation](CdclOracle::bcp).
- First unique implication point [analysis](CdclOracle::analyse) and non-chronological backjumping.
- VSIDS activity, held on an [IndexHeap], with phase saving for decisions.
- Restarts scheduled by the [luby](crate::generic::luby) sequence.
- Assumptions as the first decision levels of each call, in the manner of MiniSAT.

The formula of an oracle is fixed, and so clauses learnt during one call are kept for the next.
Learnt clauses are periodically [reduced](CdclOracle::reduce) when no decision has been made.

Internally, atoms of the formula are mapped to a contiguous range of variables, and each literal to an index of watch lists.
*/

mod analysis;
mod backjump;
mod bcp;
mod decision;
mod reduction;
mod search;

use std::time::{Duration, Instant};

use fnv::FnvHashMap;

use crate::{
    generic::{index_heap::IndexHeap, luby::Luby},
    misc::log::targets::{self},
    oracle::{CallbackTerminate, Oracle, OracleReport},
    structures::{
        assignment::Assignment,
        atom::Atom,
        formula::Formula,
        literal::{CLiteral, Literal},
    },
};

/// An internal literal, as twice a variable, plus one if negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Lit(u32);

impl Lit {
    fn new(var: usize, polarity: bool) -> Self {
        Lit(((var as u32) << 1) | u32::from(!polarity))
    }

    fn var(self) -> usize {
        (self.0 >> 1) as usize
    }

    fn polarity(self) -> bool {
        self.0 & 1 == 0
    }

    fn negate(self) -> Self {
        Lit(self.0 ^ 1)
    }

    /// The index of the watch list of the literal.
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// The value of `literal` given the values of each variable.
fn value_of(values: &[Option<bool>], literal: Lit) -> Option<bool> {
    values[literal.var()].map(|value| value == literal.polarity())
}

/// Counts for various things which count, roughly.
#[derive(Clone, Debug, Default)]
pub struct OracleCounters {
    pub calls: usize,
    pub conflicts: usize,
    pub decisions: usize,
    pub restarts: usize,
    pub reductions: usize,
}

/// The oracle.
pub struct CdclOracle {
    /// For each variable, the atom of the formula.
    atoms: Vec<Atom>,

    /// For each atom of the formula, the variable.
    lookup: FnvHashMap<Atom, usize>,

    /// Clauses of at least two literals, with original clauses before learnt clauses.
    /// The first two literals of each clause are watched.
    clauses: Vec<Vec<Lit>>,

    /// A count of the original clauses.
    original_count: usize,

    /// For each literal, the clauses watching the literal.
    watches: Vec<Vec<usize>>,

    values: Vec<Option<bool>>,
    levels: Vec<usize>,
    reasons: Vec<Option<usize>>,

    /// The last value of each variable, used when deciding on the variable.
    phases: Vec<bool>,

    /// Scratch space for analysis.
    seen: Vec<bool>,

    trail: Vec<Lit>,

    /// The position on the trail at which each decision level begins.
    trail_limits: Vec<usize>,

    /// The position on the trail of the next literal to propagate.
    q_head: usize,

    activity: IndexHeap<f64>,
    bump: f64,

    luby: Luby,

    /// A count of learnt clauses which triggers a reduction.
    max_learnts: usize,

    /// True if the formula is known to be unsatisfiable.
    unsatisfiable: bool,

    time_limit: Option<Duration>,
    callback_terminate: Option<Box<CallbackTerminate>>,

    pub counters: OracleCounters,
}

impl CdclOracle {
    fn decision_level(&self) -> usize {
        self.trail_limits.len()
    }

    fn new_level(&mut self) {
        self.trail_limits.push(self.trail.len());
    }

    fn learnt_count(&self) -> usize {
        self.clauses.len() - self.original_count
    }

    /// The internal literal of `literal`, if the atom of `literal` is of the formula.
    fn internal(&self, literal: CLiteral) -> Option<Lit> {
        self.lookup
            .get(&literal.atom())
            .map(|var| Lit::new(*var, literal.polarity()))
    }

    /// Stores `clause` and watches the first two literals, returning the key of the clause.
    fn attach(&mut self, clause: Vec<Lit>) -> usize {
        let key = self.clauses.len();
        self.watches[clause[0].index()].push(key);
        self.watches[clause[1].index()].push(key);
        self.clauses.push(clause);
        key
    }

    /// Assigns `literal` at the current level, returning false if `literal` conflicts with the current valuation.
    fn enqueue(&mut self, literal: Lit, reason: Option<usize>) -> bool {
        match value_of(&self.values, literal) {
            Some(value) => value,
            None => {
                let var = literal.var();
                self.values[var] = Some(literal.polarity());
                self.levels[var] = self.decision_level();
                self.reasons[var] = reason;
                self.trail.push(literal);
                true
            }
        }
    }

    /// The current valuation, as an assignment over atoms of the formula.
    fn model(&self) -> Assignment {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(var, value)| value.map(|value| CLiteral::new(self.atoms[var], value)))
            .collect()
    }

    /// Whether the time limit has passed, or termination was requested.
    fn interrupted(&mut self, start: Instant) -> bool {
        if let Some(limit) = self.time_limit {
            if start.elapsed() > limit {
                return true;
            }
        }
        match &mut self.callback_terminate {
            Some(callback) => callback(),
            None => false,
        }
    }
}

impl Oracle for CdclOracle {
    fn from_formula(formula: &Formula, time_limit: Option<Duration>) -> Self {
        let atoms = formula.atoms().to_vec();
        let lookup = atoms
            .iter()
            .enumerate()
            .map(|(var, atom)| (*atom, var))
            .collect::<FnvHashMap<_, _>>();
        let var_count = atoms.len();

        let mut activity = IndexHeap::default();
        for var in 0..var_count {
            activity.add(var, 0.0);
            activity.activate(var);
        }

        let mut oracle = CdclOracle {
            atoms,
            lookup,
            clauses: Vec::with_capacity(formula.clauses().len()),
            original_count: 0,
            watches: vec![Vec::default(); 2 * var_count],
            values: vec![None; var_count],
            levels: vec![0; var_count],
            reasons: vec![None; var_count],
            phases: vec![false; var_count],
            seen: vec![false; var_count],
            trail: Vec::with_capacity(var_count),
            trail_limits: Vec::default(),
            q_head: 0,
            activity,
            bump: 1.0,
            luby: Luby::default(),
            max_learnts: (formula.clauses().len() / 3).max(2000),
            unsatisfiable: formula.has_empty_clause(),
            time_limit,
            callback_terminate: None,
            counters: OracleCounters::default(),
        };

        let mut units = Vec::default();
        for clause in formula.clauses() {
            let clause = clause
                .iter()
                .filter_map(|literal| oracle.internal(*literal))
                .collect::<Vec<_>>();
            match clause.len() {
                0 => oracle.unsatisfiable = true,
                1 => units.push(clause[0]),
                _ => {
                    oracle.attach(clause);
                }
            }
        }
        oracle.original_count = oracle.clauses.len();

        for unit in units {
            if !oracle.enqueue(unit, None) {
                oracle.unsatisfiable = true;
            }
        }
        if !oracle.unsatisfiable && oracle.bcp().is_some() {
            oracle.unsatisfiable = true;
        }

        log::debug!(
            target: targets::ORACLE,
            "Built over {var_count} atoms and {} clauses, unsatisfiable: {}",
            oracle.original_count,
            oracle.unsatisfiable
        );

        oracle
    }

    fn solve_given(&mut self, assumptions: &Assignment) -> OracleReport {
        self.counters.calls += 1;

        if self.unsatisfiable || !assumptions.is_consistent() {
            return OracleReport::Unsatisfiable;
        }

        self.backjump(0);
        let assumed = assumptions
            .sorted_literals()
            .into_iter()
            .filter_map(|literal| self.internal(literal))
            .collect::<Vec<_>>();

        let report = self.search(&assumed, Instant::now());
        log::debug!(target: targets::ORACLE, "{report} given {} assumptions", assumed.len());
        report
    }

    fn set_time_limit(&mut self, time_limit: Option<Duration>) {
        self.time_limit = time_limit;
    }

    fn set_callback_terminate(&mut self, callback: Box<CallbackTerminate>) {
        self.callback_terminate = Some(callback);
    }
}
