/*!
An ordering of atoms, by estimated propagation yield.

Lookahead windows are taken from the ordering, and so atoms early in the ordering are looked ahead on more often.

# Overview

The yield of an atom *v* with respect to an assignment *A* is the smaller of the sizes of the closures of *A* with *v* and with -*v*.
The smaller of the two is taken as the size of the closure regardless of which polarity of *v* is eventually chosen.

The ordering is by the average yield of each atom over three representative assignments:
- The global assignment.
- The smallest stream of the pool.
- The largest stream of the pool.

Atoms assigned by the global assignment are placed at the end of the ordering, as no window will contain them.

Estimating yields requires two closures for each atom and representative, and so the ordering is recomputed at most once per cooldown.

# Windows

A [window](VariableOrdering::window) of size *k* is the first *k* atoms of the ordering, unassigned by some assignment, found by walking the ordering from a random offset and wrapping around the end of the ordering.
*/

use std::time::{Duration, Instant};

use crate::{
    context::GenericContext,
    db::clause::ClauseDB,
    dispatch::{
        library::delta::{self, Delta},
        Dispatch,
    },
    misc::log::targets::{self},
    oracle::Oracle,
    structures::{
        assignment::Assignment,
        atom::Atom,
        literal::{CLiteral, Literal},
    },
};

/// The ordering of atoms, and when the ordering was computed.
#[derive(Clone, Debug)]
pub struct VariableOrdering {
    order: Vec<Atom>,

    /// When the ordering was last computed, if ever.
    last_computed: Option<Instant>,

    /// The minimum time between computations.
    cooldown: Duration,
}

impl VariableOrdering {
    /// An ordering of `atoms`, in the order given, which has never been computed.
    pub fn new(atoms: &[Atom], cooldown: Duration) -> Self {
        VariableOrdering {
            order: atoms.to_vec(),
            last_computed: None,
            cooldown,
        }
    }

    /// The atoms, in order.
    pub fn order(&self) -> &[Atom] {
        &self.order
    }

    /// Whether the cooldown has passed at `now`, or the ordering has never been computed.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_computed {
            None => true,
            Some(then) => now.saturating_duration_since(then) >= self.cooldown,
        }
    }

    /// Recomputes the ordering, by average yield over `representatives` of each atom unassigned by `global`.
    pub fn recompute(
        &mut self,
        clause_db: &ClauseDB,
        global: &Assignment,
        representatives: &[&Assignment],
        now: Instant,
    ) {
        let (unassigned, assigned): (Vec<Atom>, Vec<Atom>) = self
            .order
            .iter()
            .partition(|atom| !global.is_assigned(**atom));

        let mut scored = unassigned
            .into_iter()
            .map(|atom| (atom, average_yield(clause_db, atom, representatives)))
            .collect::<Vec<_>>();

        // Stable, so ties keep the previous ordering.
        scored.sort_by(|(_, a), (_, b)| b.total_cmp(a));

        self.order = scored.into_iter().map(|(atom, _)| atom).collect();
        self.order.extend(assigned);
        self.last_computed = Some(now);
    }

    /// A window of at most `size` atoms unassigned by `assignment`, walking the ordering from a random offset.
    ///
    /// The window is shorter than `size` only if fewer than `size` atoms are unassigned.
    pub fn window(&self, assignment: &Assignment, size: usize, rng: &mut impl rand::Rng) -> Vec<Atom> {
        if self.order.is_empty() {
            return Vec::default();
        }
        let offset = rng.gen_range(0..self.order.len());
        let (before, after) = self.order.split_at(offset);

        after
            .iter()
            .chain(before)
            .filter(|atom| !assignment.is_assigned(**atom))
            .take(size)
            .copied()
            .collect()
    }
}

/// The yield of `atom`, as the smaller of the average closure sizes over `representatives` with `atom` and with -`atom`.
fn average_yield(clause_db: &ClauseDB, atom: Atom, representatives: &[&Assignment]) -> f64 {
    if representatives.is_empty() {
        return 0.0;
    }

    let (positive, negative) = representatives
        .iter()
        .fold((0, 0), |(positive, negative), representative| {
            (
                positive + clause_db.closure(representative, [CLiteral::new(atom, true)]).len(),
                negative + clause_db.closure(representative, [CLiteral::new(atom, false)]).len(),
            )
        });

    let count = representatives.len() as f64;
    (positive as f64 / count).min(negative as f64 / count)
}

impl<O: Oracle> GenericContext<O> {
    /// Recomputes the variable ordering, if the cooldown has passed.
    ///
    /// The representatives are the global assignment, and the smallest and largest streams of the pool.
    pub fn refresh_ordering(&mut self) {
        let now = Instant::now();
        if !self.ordering.is_due(now) {
            return;
        }

        let smallest = self.pool.smallest().map(|stream| stream.snapshot());
        let largest = self.pool.largest().map(|stream| stream.snapshot());

        let mut representatives = vec![&self.init];
        representatives.extend(smallest.as_ref());
        representatives.extend(largest.as_ref());

        self.ordering
            .recompute(&self.clause_db, &self.init, &representatives, now);

        let unassigned = self
            .formula
            .atom_count()
            .saturating_sub(self.init.assigned_atom_count());
        log::debug!(target: targets::ORDERING, "Ordering recomputed with {unassigned} unassigned atoms");
        self.dispatch(|| Dispatch::Delta(Delta::Global(delta::Global::Ordering { unassigned })));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generic::minimal_pcg::MinimalPCG32, structures::formula::Formula};
    use rand_core::SeedableRng;

    #[test]
    fn high_yield_first() {
        // 3 forces a chain through 4, 5 and 6 either way, while 1 and 2 force little.
        let formula = Formula::from_clauses(vec![
            vec![-3, 4],
            vec![3, 4],
            vec![-4, 5],
            vec![-5, 6],
            vec![1, 2],
        ]);
        let clause_db = ClauseDB::from_formula(&formula);
        let mut ordering = VariableOrdering::new(formula.atoms(), Duration::from_secs(60));

        let empty = Assignment::default();
        let now = Instant::now();
        ordering.recompute(&clause_db, &empty, &[&empty], now);

        assert_eq!(ordering.order().first(), Some(&3));
        assert_eq!(ordering.order().len(), formula.atom_count());
        assert!(!ordering.is_due(now));
        assert!(ordering.is_due(now + Duration::from_secs(60)));
    }

    #[test]
    fn yield_averages_each_polarity_before_the_minimum() {
        // Under {2} atom 1 forces much when true, and under {6} much when false.
        // Atom 10 forces a little either way under both.
        let formula = Formula::from_clauses(vec![
            vec![-1, -2, 3],
            vec![-1, -2, 4],
            vec![-1, -2, 5],
            vec![1, -6, 7],
            vec![1, -6, 8],
            vec![1, -6, 9],
            vec![-10, 11],
            vec![10, 12],
        ]);
        let clause_db = ClauseDB::from_formula(&formula);

        let first = Assignment::from_literals([2]);
        let second = Assignment::from_literals([6]);
        let representatives = [&first, &second];

        assert_eq!(average_yield(&clause_db, 1, &representatives), 3.5);
        assert_eq!(average_yield(&clause_db, 10, &representatives), 3.0);

        let mut ordering = VariableOrdering::new(formula.atoms(), Duration::ZERO);
        ordering.recompute(&clause_db, &Assignment::default(), &representatives, Instant::now());

        let position = |atom: Atom| ordering.order().iter().position(|a| *a == atom);
        assert!(position(1) < position(10));
    }

    #[test]
    fn assigned_atoms_last() {
        let formula = Formula::from_clauses(vec![vec![1, 2], vec![-2, 3]]);
        let clause_db = ClauseDB::from_formula(&formula);
        let mut ordering = VariableOrdering::new(formula.atoms(), Duration::ZERO);

        let global = Assignment::from_literals([2]);
        ordering.recompute(&clause_db, &global, &[&global], Instant::now());

        assert_eq!(ordering.order().last(), Some(&2));
    }

    #[test]
    fn window_skips_assigned_and_wraps() {
        let ordering = VariableOrdering::new(&[1, 2, 3, 4, 5], Duration::ZERO);
        let assignment = Assignment::from_literals([2, -4]);
        let mut rng = MinimalPCG32::from_seed(5_u64.to_le_bytes());

        for _ in 0..20 {
            let window = ordering.window(&assignment, 2, &mut rng);
            assert_eq!(window.len(), 2);
            assert!(window.iter().all(|atom| [1, 3, 5].contains(atom)));
        }

        let window = ordering.window(&assignment, 8, &mut rng);
        let mut sorted = window.clone();
        sorted.sort();
        assert_eq!(sorted, vec![1, 3, 5]);
    }
}
