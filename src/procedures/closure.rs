/*!
Unit propagation, as the closure of an assignment.

See [ClauseDB::close] for the relevant method.

# Overview

Given an assignment *A* and some literals to add, the closure of *A* extends *A* with every literal forced by unit propagation.

Literals are taken from a worklist.
On taking a literal *p*, *p* is added to *A* and each clause containing -*p* is examined:
- If some literal of the clause is part of *A*, the clause is satisfied and nothing follows.
- Otherwise, the *candidates* of the clause are those literals whose negation is not part of *A*.
  - If a single candidate remains, the candidate is forced and added to the worklist.
  - If no candidate remains, every literal of the clause is false.
    The negation of *p* is added to *A*, so the failure of the clause is visible as an inconsistency of *A*.

Closure stops at the first inconsistency, and callers are expected to check [consistency](Assignment::is_consistent) of the result.

# Example

```rust
# use stream_sat::db::clause::ClauseDB;
# use stream_sat::structures::{assignment::Assignment, formula::Formula};
let formula = Formula::from_clauses(vec![vec![1, 2], vec![-1, 2], vec![-2, 3]]);
let clause_db = ClauseDB::from_formula(&formula);

let closed = clause_db.closure(&Assignment::default(), [-1]);
assert_eq!(closed, Assignment::from_literals([-1, 2, 3]));

let contradiction = Formula::from_clauses(vec![vec![1], vec![-1]]);
let clause_db = ClauseDB::from_formula(&contradiction);
assert!(!clause_db.closure(&Assignment::default(), [1]).is_consistent());
```
*/

use crate::{
    db::clause::ClauseDB,
    misc::log::targets::{self},
    structures::{
        assignment::Assignment,
        clause::Clause,
        literal::{CLiteral, Literal},
    },
};

impl ClauseDB {
    /// Extends `assignment` to the closure of `assignment` together with `add`, in place.
    ///
    /// Each literal of `add` is propagated, whether or not the literal was already part of the assignment.
    /// Forced literals are propagated once.
    pub fn close(&self, assignment: &mut Assignment, add: impl IntoIterator<Item = CLiteral>) {
        // Pairs of a literal and whether the literal was given, rather than forced.
        let mut worklist: Vec<(CLiteral, bool)> = add.into_iter().map(|l| (l, true)).collect();

        while let Some((literal, given)) = worklist.pop() {
            let fresh = assignment.insert(literal);
            if !assignment.is_consistent() {
                log::trace!(target: targets::PROPAGATION, "Conflict on {literal}");
                return;
            }
            if !fresh && !given {
                continue;
            }

            for key in self.occurrences(literal.negate()) {
                let Some(clause) = self.get(*key) else {
                    continue;
                };
                if clause.satisfied_by(assignment) {
                    continue;
                }

                let candidates = {
                    let mut candidates = clause.candidates(assignment);
                    (candidates.next(), candidates.next())
                };
                match candidates {
                    (Some(unit), None) => {
                        if !assignment.contains(unit) {
                            worklist.push((unit, false));
                        }
                    }

                    (None, _) => {
                        log::trace!(target: targets::PROPAGATION, "Clause {key} falsified by {literal}");
                        assignment.insert(literal.negate());
                        return;
                    }

                    _ => {}
                }
            }
        }
    }

    /// The closure of `assignment` together with `add`.
    pub fn closure(&self, assignment: &Assignment, add: impl IntoIterator<Item = CLiteral>) -> Assignment {
        let mut closed = assignment.clone();
        self.close(&mut closed, add);
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::formula::Formula;

    fn chain() -> ClauseDB {
        ClauseDB::from_formula(&Formula::from_clauses(vec![
            vec![-1, 2],
            vec![-2, 3],
            vec![-3, 4],
            vec![-4, -1, 5],
        ]))
    }

    #[test]
    fn chain_propagates() {
        let clause_db = chain();
        let closed = clause_db.closure(&Assignment::default(), [1]);
        assert_eq!(closed.sorted_literals(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn no_over_propagation() {
        let clause_db = chain();
        let closed = clause_db.closure(&Assignment::default(), [-5]);
        assert_eq!(closed.sorted_literals(), vec![-5]);
    }

    #[test]
    fn closed_assignments_are_fixed() {
        let clause_db = chain();
        let closed = clause_db.closure(&Assignment::default(), [2]);
        assert_eq!(clause_db.closure(&closed, []), closed);
        assert_eq!(clause_db.closure(&closed, [2]), closed);
    }

    #[test]
    fn falsified_clause_is_inconsistent() {
        let clause_db = ClauseDB::from_formula(&Formula::from_clauses(vec![vec![1, 2]]));
        let partial = Assignment::from_literals([-1]);
        let closed = clause_db.closure(&partial, [-2]);
        assert!(!closed.is_consistent());
    }
}
