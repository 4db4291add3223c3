use std::{fs::File, io::BufReader};

use rand::Rng;
use rand_core::SeedableRng;

use stream_sat::{
    builder::dimacs::parse_dimacs,
    generic::minimal_pcg::MinimalPCG32,
    oracle::{cdcl::CdclOracle, Oracle, OracleReport},
    structures::{
        assignment::Assignment,
        atom::Atom,
        formula::Formula,
        literal::{CLiteral, Literal},
    },
};

fn formula_from(path: &str) -> Formula {
    let file = File::open(path).expect("cnf file");
    let parsed = parse_dimacs(BufReader::new(file)).expect("parsed cnf");
    Formula::from_clauses(parsed.clauses)
}

/// Whether some valuation of atoms `1..=atoms` satisfies the formula, by enumeration.
fn brute_force(formula: &Formula, atoms: Atom) -> bool {
    (0..(1_u32 << atoms)).any(|valuation| {
        let assignment = (1..=atoms)
            .map(|atom| CLiteral::new(atom, (valuation >> (atom - 1)) & 1 == 1))
            .collect::<Assignment>();
        formula.satisfied_by(&assignment)
    })
}

mod oracle {
    use super::*;

    #[test]
    fn pigeonhole() {
        let formula = formula_from(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/cnf/unsat/pigeonhole_3_2.cnf"));
        let mut oracle = CdclOracle::from_formula(&formula, None);
        assert_eq!(oracle.solve_given(&Assignment::default()), OracleReport::Unsatisfiable);
    }

    #[test]
    fn assumptions_restrict_models() {
        let formula = formula_from(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/cnf/sat/alternating.cnf"));
        let mut oracle = CdclOracle::from_formula(&formula, None);

        for assumption in [1, -1, 2, -2] {
            match oracle.solve_given(&Assignment::from_literals([assumption])) {
                OracleReport::Satisfiable(model) => {
                    assert!(model.contains(assumption));
                    assert!(formula.satisfied_by(&model));
                }
                report => panic!("{report} given {assumption}"),
            }
        }

        // Adjacent atoms differ.
        let both = Assignment::from_literals([1, 2]);
        assert_eq!(oracle.solve_given(&both), OracleReport::Unsatisfiable);

        // Clauses learnt under assumptions hold of the formula alone.
        assert!(matches!(
            oracle.solve_given(&Assignment::default()),
            OracleReport::Satisfiable(_)
        ));
    }

    #[test]
    fn inconsistent_assumptions() {
        let formula = Formula::from_clauses(vec![vec![1, 2]]);
        let mut oracle = CdclOracle::from_formula(&formula, None);
        assert_eq!(
            oracle.solve_given(&Assignment::from_literals([1, -1])),
            OracleReport::Unsatisfiable
        );
    }

    #[test]
    fn agrees_with_enumeration() {
        const ATOMS: Atom = 10;
        let mut rng = MinimalPCG32::from_seed(97_u64.to_le_bytes());

        for _ in 0..60 {
            let clause_count = rng.gen_range(20..60);
            let clauses = (0..clause_count)
                .map(|_| {
                    (0..3)
                        .map(|_| CLiteral::new(rng.gen_range(1..=ATOMS), rng.gen_bool(0.5)))
                        .collect::<Vec<_>>()
                })
                .collect::<Vec<_>>();
            let formula = Formula::from_clauses(clauses);

            let mut oracle = CdclOracle::from_formula(&formula, None);
            match oracle.solve_given(&Assignment::default()) {
                OracleReport::Satisfiable(model) => {
                    assert!(formula.satisfied_by(&model));
                    assert!(formula.is_full(&model));
                }
                OracleReport::Unsatisfiable => assert!(!brute_force(&formula, ATOMS)),
                OracleReport::Unknown => panic!("no time limit was set"),
            }
        }
    }
}
