//! Reduction of the clause database, without any decision made.
//!
//! With no decision made, each valued literal is valued for good, and so:
//! - Satisfied clauses are removed.
//! - False literals are removed from the remaining clauses.
//! - The longer half of the learnt clauses is forgotten.
//!
//! Watches are rebuilt from scratch, and as no variable of the first level is ever analysed, reasons are dropped.

use super::{value_of, CdclOracle};
use crate::misc::log::targets::{self};

impl CdclOracle {
    /// For documentation see the [module](self).
    ///
    /// Requires the decision level is zero and propagation is complete.
    pub(super) fn reduce(&mut self) {
        self.counters.reductions += 1;

        let mut originals = Vec::default();
        let mut learnts = Vec::default();
        let mut units = Vec::default();

        for (key, clause) in std::mem::take(&mut self.clauses).into_iter().enumerate() {
            if clause.iter().any(|literal| value_of(&self.values, *literal) == Some(true)) {
                continue;
            }

            let clause = clause
                .into_iter()
                .filter(|literal| value_of(&self.values, *literal).is_none())
                .collect::<Vec<_>>();

            match clause.len() {
                0 => self.unsatisfiable = true,
                1 => units.push(clause[0]),
                _ if key < self.original_count => originals.push(clause),
                _ => learnts.push(clause),
            }
        }

        learnts.sort_by_key(|clause| clause.len());
        learnts.truncate(learnts.len() / 2);

        for watch_list in self.watches.iter_mut() {
            watch_list.clear();
        }
        for reason in self.reasons.iter_mut() {
            *reason = None;
        }

        self.original_count = originals.len();
        for clause in originals.into_iter().chain(learnts) {
            self.attach(clause);
        }

        for unit in units {
            if !self.enqueue(unit, None) {
                self.unsatisfiable = true;
            }
        }

        self.max_learnts += self.max_learnts / 10;

        log::debug!(
            target: targets::ORACLE,
            "Reduced to {} original and {} learnt clauses",
            self.original_count,
            self.learnt_count()
        );
    }
}
