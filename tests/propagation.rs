use rand::Rng;
use rand_core::SeedableRng;

use stream_sat::{
    db::clause::ClauseDB,
    generic::minimal_pcg::MinimalPCG32,
    structures::{
        assignment::Assignment,
        atom::Atom,
        formula::Formula,
        literal::{CLiteral, Literal},
    },
};

const ATOMS: Atom = 12;

/// A random formula of three-literal clauses, without units.
fn random_formula(rng: &mut MinimalPCG32, clause_count: usize) -> Formula {
    let mut clauses = Vec::default();
    while clauses.len() < clause_count {
        let mut clause: Vec<CLiteral> = Vec::default();
        while clause.len() < 3 {
            let atom = rng.gen_range(1..=ATOMS);
            if clause.iter().any(|literal| literal.atom() == atom) {
                continue;
            }
            clause.push(CLiteral::new(atom, rng.gen_bool(0.5)));
        }
        clauses.push(clause);
    }
    Formula::from_clauses(clauses)
}

/// Literals over distinct atoms.
fn random_literals(rng: &mut MinimalPCG32, count: usize) -> Vec<CLiteral> {
    let mut literals: Vec<CLiteral> = Vec::default();
    while literals.len() < count {
        let atom = rng.gen_range(1..=ATOMS);
        if literals.iter().any(|literal| literal.atom() == atom) {
            continue;
        }
        literals.push(CLiteral::new(atom, rng.gen_bool(0.5)));
    }
    literals
}

/// Unit propagation by repeated scans of every clause, to a fixpoint.
///
/// None, if some clause is falsified.
fn naive_propagation(formula: &Formula, start: &[CLiteral]) -> Option<Assignment> {
    let mut assignment = Assignment::from_literals(start.iter().copied());
    if !assignment.is_consistent() {
        return None;
    }

    loop {
        let mut changed = false;

        for clause in formula.clauses() {
            if clause.iter().any(|literal| assignment.contains(*literal)) {
                continue;
            }
            let candidates = clause
                .iter()
                .filter(|literal| !assignment.contains(literal.negate()))
                .collect::<Vec<_>>();
            match candidates.as_slice() {
                [] => return None,
                [unit] => {
                    assignment.insert(**unit);
                    changed = true;
                }
                _ => {}
            }
        }

        if !changed {
            return Some(assignment);
        }
    }
}

mod closure {
    use super::*;

    #[test]
    fn agrees_with_fixpoint() {
        let mut rng = MinimalPCG32::from_seed(83_u64.to_le_bytes());

        for _ in 0..200 {
            let formula = random_formula(&mut rng, 40);
            let clause_db = ClauseDB::from_formula(&formula);
            let count = rng.gen_range(1..=4);
            let given = random_literals(&mut rng, count);

            let closed = clause_db.closure(&Assignment::default(), given.iter().copied());

            match naive_propagation(&formula, &given) {
                Some(fixpoint) => assert_eq!(closed, fixpoint, "given {given:?}"),
                None => assert!(!closed.is_consistent(), "given {given:?}"),
            }
        }
    }

    #[test]
    fn idempotent() {
        let mut rng = MinimalPCG32::from_seed(5_u64.to_le_bytes());

        for _ in 0..100 {
            let formula = random_formula(&mut rng, 30);
            let clause_db = ClauseDB::from_formula(&formula);
            let given = random_literals(&mut rng, 2);

            let closed = clause_db.closure(&Assignment::default(), given.iter().copied());
            if !closed.is_consistent() {
                continue;
            }
            let again = clause_db.closure(&closed, closed.sorted_literals());
            assert_eq!(closed, again);
        }
    }

    #[test]
    fn extends_assignment() {
        let mut rng = MinimalPCG32::from_seed(19_u64.to_le_bytes());

        for _ in 0..100 {
            let formula = random_formula(&mut rng, 30);
            let clause_db = ClauseDB::from_formula(&formula);
            let base = clause_db.closure(&Assignment::default(), random_literals(&mut rng, 1));
            if !base.is_consistent() {
                continue;
            }

            let extended = clause_db.closure(&base, random_literals(&mut rng, 1));
            assert!(base.is_subset(&extended));
        }
    }
}

mod lookahead {
    use super::*;

    /// The intersection of the fixpoints of each consistent valuation of `window`, by brute force.
    fn brute_force(formula: &Formula, base: &Assignment, window: &[Atom]) -> Option<Assignment> {
        let mut common: Option<Assignment> = None;

        for branch in 0..(1_u32 << window.len()) {
            let mut start = base.sorted_literals();
            start.extend(
                window
                    .iter()
                    .enumerate()
                    .map(|(index, atom)| CLiteral::new(*atom, (branch >> index) & 1 == 1)),
            );

            if let Some(fixpoint) = naive_propagation(formula, &start) {
                match common.as_mut() {
                    None => common = Some(fixpoint),
                    Some(common) => common.intersect_with(&fixpoint),
                }
            }
        }

        common
    }

    #[test]
    fn agrees_with_brute_force() {
        let mut rng = MinimalPCG32::from_seed(41_u64.to_le_bytes());

        for _ in 0..150 {
            let formula = random_formula(&mut rng, 50);
            let clause_db = ClauseDB::from_formula(&formula);

            let base = clause_db.closure(&Assignment::default(), random_literals(&mut rng, 1));
            if !base.is_consistent() {
                continue;
            }

            let window = (1..=ATOMS)
                .filter(|atom| !base.is_assigned(*atom))
                .take(3)
                .collect::<Vec<_>>();

            let forced = clause_db.ranged_propagation(&base, &window, &mut rng);
            let expected = brute_force(&formula, &base, &window);

            match (&forced, &expected) {
                (Some(forced), Some(expected)) => {
                    assert!(base.is_subset(forced));
                    assert_eq!(forced, expected);
                }
                (None, None) => {}
                _ => panic!("lookahead {forced:?} differs from {expected:?} on {window:?}"),
            }
        }
    }

    #[test]
    fn forced_by_either_polarity() {
        let formula = Formula::from_clauses(vec![vec![1, 2], vec![-1, 2], vec![-2, 3]]);
        let clause_db = ClauseDB::from_formula(&formula);
        let mut rng = MinimalPCG32::from_seed(3_u64.to_le_bytes());

        let forced = clause_db.ranged_propagation(&Assignment::default(), &[1, 2, 3], &mut rng);
        assert_eq!(forced, Some(Assignment::from_literals([2, 3])));
    }

    #[test]
    fn empty_window_is_identity() {
        let formula = Formula::from_clauses(vec![vec![1, 2], vec![-1, 2]]);
        let clause_db = ClauseDB::from_formula(&formula);
        let mut rng = MinimalPCG32::from_seed(3_u64.to_le_bytes());

        let base = Assignment::from_literals([1]);
        let forced = clause_db.ranged_propagation(&base, &[], &mut rng);
        assert_eq!(forced, Some(Assignment::from_literals([1])));
    }
}
