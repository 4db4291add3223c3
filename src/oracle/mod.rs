/*!
Exact oracles, complete procedures for deciding the satisfiability of a formula under assumptions.

An oracle is built once for a formula and a time limit, and is then asked about the formula together with some [assignment](Assignment) of assumptions, many times over.
Each call returns an [OracleReport]:
- [Satisfiable](OracleReport::Satisfiable), with a model of the formula extending the assumptions.
- [Unsatisfiable](OracleReport::Unsatisfiable), if no model of the formula extends the assumptions.
- [Unknown](OracleReport::Unknown), if the time limit expired or the oracle was asked to terminate.

Oracles are used in three places during a search:
- By the orchestrator, with a short time limit, to check a stream after growth.
- By the orchestrator, with a long time limit, on exhaustion of the pool.
- By each verifier thread, each with an oracle of its own.

The oracle of the library is [CdclOracle](cdcl::CdclOracle), a conflict-driven clause-learning solver.

# Example

```rust
# use stream_sat::oracle::{cdcl::CdclOracle, Oracle, OracleReport};
# use stream_sat::structures::{assignment::Assignment, formula::Formula};
let formula = Formula::from_clauses(vec![vec![1, 2], vec![-1, 2], vec![-2, 3]]);
let mut oracle = CdclOracle::from_formula(&formula, None);

match oracle.solve_given(&Assignment::from_literals([1])) {
    OracleReport::Satisfiable(model) => assert!(formula.satisfied_by(&model)),
    _ => panic!("expected a model"),
}

let report = oracle.solve_given(&Assignment::from_literals([-3]));
assert_eq!(report, OracleReport::Unsatisfiable);
```
*/

pub mod cdcl;

use std::time::Duration;

use crate::structures::{assignment::Assignment, formula::Formula};

/// The result of a call to an oracle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OracleReport {
    /// A model of the formula, extending the assumptions, and assigning every atom of the formula.
    Satisfiable(Assignment),

    /// No model of the formula extends the assumptions.
    Unsatisfiable,

    /// Nothing is known, due to time or a request to terminate.
    Unknown,
}

impl std::fmt::Display for OracleReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Satisfiable(_) => write!(f, "Satisfiable"),
            Self::Unsatisfiable => write!(f, "Unsatisfiable"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A callback to request termination of an oracle call, terminating if true is returned.
pub type CallbackTerminate = dyn FnMut() -> bool + Send;

/// Methods required of an exact oracle.
pub trait Oracle: Sized {
    /// An oracle for `formula`, with each call limited to `time_limit`, if given.
    fn from_formula(formula: &Formula, time_limit: Option<Duration>) -> Self;

    /// Whether the formula is satisfiable together with `assumptions`.
    ///
    /// Inconsistent assumptions are unsatisfiable, and assumptions on atoms outside the formula are ignored.
    fn solve_given(&mut self, assumptions: &Assignment) -> OracleReport;

    /// Revises the time limit of each call.
    fn set_time_limit(&mut self, time_limit: Option<Duration>);

    /// Sets a callback which is polled during a call, and which terminates the call with [Unknown](OracleReport::Unknown) on returning true.
    fn set_callback_terminate(&mut self, callback: Box<CallbackTerminate>);
}
