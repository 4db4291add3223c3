/*!
Bounded lookahead, or *ranged* propagation, over a small window of atoms.

See [ClauseDB::ranged_propagation] for the relevant method.

# Overview

Given an assignment *A* and a window of *k* atoms unassigned by *A*, each of the 2^*k* valuations of the window is [closed](crate::procedures::closure) against *A*.
Closures which are inconsistent are failed branches, and are discarded.
The remaining closures are intersected, and any literal in the intersection but not in *A* is true in every consistent completion of the window, and so follows from *A*.

- If no branch is consistent, the window is contradictory under *A*, and `None` is returned.
- Otherwise, the intersection is returned, which always contains *A*.

Branches are evaluated in a random order, and evaluation stops early once the intersection has shrunk to the size of *A*, as an intersection never grows.

Probing a handful of atoms at a time keeps the enumeration cheap: a window of six atoms is sixty-four closures.

# Example

```rust
# use stream_sat::db::clause::ClauseDB;
# use stream_sat::generic::minimal_pcg::MinimalPCG32;
# use stream_sat::structures::{assignment::Assignment, formula::Formula};
# use rand_core::SeedableRng;
let formula = Formula::from_clauses(vec![vec![1, 2], vec![-1, 2], vec![-2, 3]]);
let clause_db = ClauseDB::from_formula(&formula);
let mut rng = MinimalPCG32::from_seed(7_u64.to_le_bytes());

let forced = clause_db
    .ranged_propagation(&Assignment::default(), &[1], &mut rng)
    .expect("a consistent branch");
assert_eq!(forced, Assignment::from_literals([2, 3]));
```
*/

use rand::seq::SliceRandom;

use crate::{
    db::clause::ClauseDB,
    misc::log::targets::{self},
    structures::{
        assignment::Assignment,
        atom::Atom,
        literal::{CLiteral, Literal},
    },
};

/// The most atoms of a window, as each valuation of the window is enumerated.
pub const MAX_WINDOW: usize = 16;

impl ClauseDB {
    /// For documentation see [procedures::lookahead](crate::procedures::lookahead).
    ///
    /// Only the first [MAX_WINDOW] atoms of the window are used.
    pub fn ranged_propagation(
        &self,
        assignment: &Assignment,
        window: &[Atom],
        rng: &mut impl rand::Rng,
    ) -> Option<Assignment> {
        let window = &window[..window.len().min(MAX_WINDOW)];

        let mut branches = (0..(1_u32 << window.len())).collect::<Vec<_>>();
        branches.shuffle(rng);

        let mut intersection: Option<Assignment> = None;
        let mut failed = 0;

        for branch in branches {
            let valuation = window
                .iter()
                .enumerate()
                .map(|(index, atom)| CLiteral::new(*atom, (branch >> index) & 1 == 1));

            let closed = self.closure(assignment, valuation);
            if !closed.is_consistent() {
                failed += 1;
                continue;
            }

            match intersection.as_mut() {
                None => intersection = Some(closed),
                Some(common) => common.intersect_with(&closed),
            }

            if let Some(common) = &intersection {
                if common.len() <= assignment.len() {
                    break;
                }
            }
        }

        match &intersection {
            None => log::trace!(target: targets::LOOKAHEAD, "All branches of {window:?} failed"),
            Some(common) => log::trace!(
                target: targets::LOOKAHEAD,
                "{window:?}: {failed} failed, {} forced",
                common.len().saturating_sub(assignment.len())
            ),
        }

        intersection
    }
}
