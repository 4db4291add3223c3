use std::time::Duration;

use stream_sat::{
    config::Config,
    context::{
        completion::{Claimant, Outcome},
        Context,
    },
    reports::Report,
    structures::formula::Formula,
    types::err::ErrorKind,
};

/// A config without verifier threads, so the orchestrator alone decides the search.
fn orchestrator_only() -> Config {
    let mut config = Config::default();
    config.fast_verifiers.value = 0;
    config.slow_verifiers.value = 0;
    config.time_limit.value = Duration::from_secs(60);
    config
}

mod basic {
    use super::*;

    #[test]
    fn forced_by_either_polarity() {
        let formula = Formula::from_clauses(vec![vec![1, 2], vec![-1, 2], vec![-2, 3]]);
        let mut ctx = Context::from_formula(orchestrator_only(), formula, None);

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));

        let model = ctx.model().expect("a model");
        assert!(model.contains(2));
        assert!(model.contains(3));
        assert!(ctx.formula.satisfied_by(&model));
    }

    #[test]
    fn unit_contradiction() {
        let formula = Formula::from_clauses(vec![vec![1], vec![-1]]);
        let mut ctx = Context::from_formula(orchestrator_only(), formula, None);

        assert!(!ctx.root.is_consistent());
        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert_eq!(ctx.model(), Err(ErrorKind::InvalidState));
    }

    #[test]
    fn empty_formula() {
        let formula = Formula::from_clauses(Vec::<Vec<i32>>::new());
        let mut ctx = Context::from_formula(orchestrator_only(), formula, None);

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert_eq!(ctx.model().map(|model| model.len()), Ok(0));
    }

    #[test]
    fn empty_clause() {
        let formula = Formula::from_clauses(vec![vec![1, 2], vec![]]);
        let mut ctx = Context::from_formula(orchestrator_only(), formula, None);

        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
    }

    #[test]
    fn units_settle_everything() {
        let formula = Formula::from_clauses(vec![vec![1], vec![-1, 2], vec![-2, -3]]);
        let mut ctx = Context::from_formula(orchestrator_only(), formula, None);

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert_eq!(ctx.completion.get().map(|claim| claim.claimant), Some(Claimant::Orchestrator));
        assert_eq!(ctx.valuation_string(), Ok("1 2 -3".to_string()));
    }

    #[test]
    fn solve_is_idempotent() {
        let formula = Formula::from_clauses(vec![vec![1, 2], vec![-1, -2]]);
        let mut ctx = Context::from_formula(orchestrator_only(), formula, None);

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        let model = ctx.model();
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert_eq!(ctx.model(), model);
    }

    #[test]
    fn no_model_before_solve() {
        let formula = Formula::from_clauses(vec![vec![1, 2]]);
        let ctx = Context::from_formula(orchestrator_only(), formula, None);

        assert_eq!(ctx.report(), Report::Unknown);
        assert_eq!(ctx.model(), Err(ErrorKind::InvalidState));
    }
}

mod exhaustion {
    use super::*;

    #[test]
    fn exhausted_pool_is_unsatisfiable() {
        // Three pigeons, two holes.
        let formula = Formula::from_clauses(vec![
            vec![1, 2],
            vec![3, 4],
            vec![5, 6],
            vec![-1, -3],
            vec![-1, -5],
            vec![-3, -5],
            vec![-2, -4],
            vec![-2, -6],
            vec![-4, -6],
        ]);
        let mut ctx = Context::from_formula(orchestrator_only(), formula, None);

        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert!(ctx.counters.deletions > 0);
        assert_eq!(
            ctx.completion.get().map(|claim| (claim.outcome.clone(), claim.claimant)),
            Some((Outcome::Unsatisfiable, Claimant::Exhaustion))
        );
    }

    #[test]
    fn exhaustion_without_search_claims_model() {
        let formula = Formula::from_clauses(vec![vec![1, 2], vec![-1, 3]]);
        let mut ctx = Context::from_formula(orchestrator_only(), formula, None);

        assert!(ctx.pool.is_empty());
        ctx.handle_exhaustion();

        assert_eq!(ctx.report(), Report::Satisfiable);
        assert!(ctx.model().is_ok_and(|model| ctx.formula.satisfied_by(&model)));
    }
}

mod verifiers {
    use super::*;

    #[test]
    fn verifiers_race_the_orchestrator() {
        let mut clauses = Vec::default();
        for atom in 1..40 {
            clauses.push(vec![-atom, atom + 1]);
            clauses.push(vec![atom, -(atom + 1), 41]);
        }
        let formula = Formula::from_clauses(clauses);

        let mut config = Config::default();
        config.fast_verifiers.value = 2;
        config.slow_verifiers.value = 1;
        config.time_limit.value = Duration::from_secs(60);

        let mut ctx = Context::from_formula(config, formula, None);
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert!(ctx.model().is_ok_and(|model| ctx.formula.satisfied_by(&model)));

        // The pool holds only the model.
        assert_eq!(ctx.pool.len(), 1);
    }
}
