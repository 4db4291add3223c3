//! Conflict analysis, to the first unique implication point.
//!
//! Resolution proceeds backwards along the trail from a conflicting clause, resolving on literals of the current decision level until a single literal of the level remains.
//! The learnt clause is the negation of that literal together with the literals of earlier levels met along the way.
//!
//! Activity of each variable met is bumped.

use super::{CdclOracle, Lit};

/// The decay factor of activity, applied by growing the bump.
const ACTIVITY_DECAY: f64 = 0.95;

/// Activity beyond which all activity is scaled down.
const ACTIVITY_LIMIT: f64 = 1e100;

impl CdclOracle {
    /// Analyses the conflict of the clause at `conflict`, returning a learnt clause with the asserting literal first, and the level to backjump to.
    ///
    /// If the learnt clause has more than one literal, the second literal is of the backjump level.
    pub(super) fn analyse(&mut self, conflict: usize) -> (Vec<Lit>, usize) {
        let level = self.decision_level();
        let mut learnt = vec![Lit(0)];
        let mut marked = Vec::default();

        let mut open = 0;
        let mut key = conflict;
        let mut skip_first = false;
        let mut trail_index = self.trail.len();

        let pivot = loop {
            for position in usize::from(skip_first)..self.clauses[key].len() {
                let literal = self.clauses[key][position];
                let var = literal.var();
                if self.seen[var] || self.levels[var] == 0 {
                    continue;
                }

                self.seen[var] = true;
                marked.push(var);
                self.bump_activity(var);

                match self.levels[var] >= level {
                    true => open += 1,
                    false => learnt.push(literal),
                }
            }

            let pivot = loop {
                trail_index -= 1;
                let literal = self.trail[trail_index];
                if self.seen[literal.var()] {
                    break literal;
                }
            };
            self.seen[pivot.var()] = false;
            open -= 1;

            if open == 0 {
                break pivot;
            }
            match self.reasons[pivot.var()] {
                Some(reason) => {
                    key = reason;
                    skip_first = true;
                }
                None => break pivot,
            }
        };

        learnt[0] = pivot.negate();
        for var in marked {
            self.seen[var] = false;
        }

        self.bump *= 1.0 / ACTIVITY_DECAY;

        match learnt.len() {
            1 => (learnt, 0),
            _ => {
                let mut max_position = 1;
                for position in 2..learnt.len() {
                    if self.levels[learnt[position].var()] > self.levels[learnt[max_position].var()] {
                        max_position = position;
                    }
                }
                learnt.swap(1, max_position);
                let backjump_level = self.levels[learnt[1].var()];
                (learnt, backjump_level)
            }
        }
    }

    /// Stores a learnt clause and asserts the first literal, after a backjump.
    pub(super) fn learn(&mut self, learnt: Vec<Lit>) {
        match learnt.len() {
            1 => {
                if !self.enqueue(learnt[0], None) {
                    self.unsatisfiable = true;
                }
            }
            _ => {
                let asserting = learnt[0];
                let key = self.attach(learnt);
                self.enqueue(asserting, Some(key));
            }
        }
    }

    fn bump_activity(&mut self, var: usize) {
        let bump = self.bump;
        self.activity.apply_to_value(var, |activity| activity + bump);

        if *self.activity.value_at(var) > ACTIVITY_LIMIT {
            self.activity.apply_to_all(|activity| activity / ACTIVITY_LIMIT);
            self.bump /= ACTIVITY_LIMIT;
        }
    }
}
