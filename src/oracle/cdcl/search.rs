//! The search loop of a call to the oracle.
//!
//! Each iteration propagates, and then either:
//! - Analyses a conflict, learns a clause, and backjumps, perhaps restarting.
//! - Reduces the clause database, if no decision has been made and enough clauses have been learnt.
//! - Asserts the next assumption, or decides on some unvalued variable.
//! - Returns a model, if every variable is valued.
//!
//! Assumptions are asserted at the first decision levels, one to a level.
//! An assumption which is already true opens an empty level, so the level of each assumption matches its position.
//! An assumption which is already false cannot be asserted, and the formula is unsatisfiable under the assumptions.

use std::time::Instant;

use super::{value_of, CdclOracle, Lit};
use crate::{generic::luby::LubyRepresentation, oracle::OracleReport};

/// Conflicts per unit of the luby sequence, between restarts.
const RESTART_UNIT: usize = 100;

/// Iterations between checks of time and termination.
const POLL_INTERVAL: usize = 64;

impl CdclOracle {
    fn restart_interval(&mut self) -> usize {
        let luby = self.luby.next().unwrap_or(LubyRepresentation::MAX);
        (luby as usize).saturating_mul(RESTART_UNIT)
    }

    /// For documentation see the [module](self).
    pub(super) fn search(&mut self, assumptions: &[Lit], start: Instant) -> OracleReport {
        let mut conflicts_until_restart = self.restart_interval();
        let mut iterations: usize = 0;

        loop {
            if iterations % POLL_INTERVAL == 0 && self.interrupted(start) {
                self.backjump(0);
                return OracleReport::Unknown;
            }
            iterations += 1;

            match self.bcp() {
                Some(conflict) => {
                    self.counters.conflicts += 1;
                    if self.decision_level() == 0 {
                        self.unsatisfiable = true;
                        return OracleReport::Unsatisfiable;
                    }

                    let (learnt, level) = self.analyse(conflict);
                    self.backjump(level);
                    self.learn(learnt);
                    if self.unsatisfiable {
                        return OracleReport::Unsatisfiable;
                    }

                    conflicts_until_restart = conflicts_until_restart.saturating_sub(1);
                    if conflicts_until_restart == 0 {
                        self.counters.restarts += 1;
                        self.backjump(0);
                        conflicts_until_restart = self.restart_interval();
                    }
                }

                None => {
                    if self.decision_level() == 0 && self.learnt_count() > self.max_learnts {
                        self.reduce();
                        if self.unsatisfiable {
                            return OracleReport::Unsatisfiable;
                        }
                        continue;
                    }

                    let mut decision = None;
                    while self.decision_level() < assumptions.len() {
                        let assumption = assumptions[self.decision_level()];
                        match value_of(&self.values, assumption) {
                            Some(true) => self.new_level(),

                            Some(false) => {
                                self.backjump(0);
                                return OracleReport::Unsatisfiable;
                            }

                            None => {
                                decision = Some(assumption);
                                break;
                            }
                        }
                    }

                    let decision = match decision.or_else(|| self.decide()) {
                        Some(literal) => literal,
                        None => {
                            let model = self.model();
                            self.backjump(0);
                            return OracleReport::Satisfiable(model);
                        }
                    };

                    self.counters.decisions += 1;
                    self.new_level();
                    self.enqueue(decision, None);
                }
            }
        }
    }
}
