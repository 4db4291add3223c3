use std::time::Duration;

use rand::Rng;
use rand_core::SeedableRng;

use stream_sat::{
    config::Config,
    context::{Context, GenericContext},
    generic::minimal_pcg::MinimalPCG32,
    oracle::{CallbackTerminate, Oracle, OracleReport},
    pool::DeletionReason,
    procedures::step::Step,
    reports::Report,
    structures::{
        assignment::Assignment,
        atom::Atom,
        formula::Formula,
        literal::{CLiteral, Literal},
    },
};

fn orchestrator_only() -> Config {
    let mut config = Config::default();
    config.fast_verifiers.value = 0;
    config.slow_verifiers.value = 0;
    config.time_limit.value = Duration::from_secs(60);
    config
}

/// A random three-literal formula satisfied by some hidden valuation of `atoms` atoms.
fn planted_formula(seed: u64, atoms: Atom, clause_count: usize) -> Formula {
    let mut rng = MinimalPCG32::from_seed(seed.to_le_bytes());
    let hidden = (1..=atoms)
        .map(|atom| CLiteral::new(atom, rng.gen_bool(0.5)))
        .collect::<Assignment>();

    let mut clauses = Vec::default();
    while clauses.len() < clause_count {
        let clause = (0..3)
            .map(|_| CLiteral::new(rng.gen_range(1..=atoms), rng.gen_bool(0.5)))
            .collect::<Vec<_>>();
        if clause.iter().any(|literal| hidden.contains(*literal)) {
            clauses.push(clause);
        }
    }
    Formula::from_clauses(clauses)
}

mod merge {
    use super::*;

    #[test]
    fn agreeing_streams_merge() {
        let formula = Formula::from_clauses(vec![vec![1, 2], vec![3, 4, 5]]);
        let mut config = orchestrator_only();
        config.merging_threshold.value = 0.0;
        let mut ctx = Context::from_formula(config, formula, None);

        let a = ctx.pool.add(Assignment::from_literals([1, 2, 3, 4, 5]));
        let b = ctx.pool.add(Assignment::from_literals([1, 2, 3, 4, -5]));
        let c = ctx.pool.add(Assignment::from_literals([-1]));

        // The threshold is the average size, 11/3.
        assert_eq!(ctx.merge_pass(), 1);
        assert_eq!(ctx.counters.merges, 1);

        assert!(!ctx.pool.contains(a.id()));
        assert!(!ctx.pool.contains(b.id()));
        assert!(ctx.pool.contains(c.id()));
        assert_eq!(ctx.pool.len(), 2);

        let merged = ctx.pool.largest().expect("merged stream");
        assert_eq!(merged.snapshot(), Assignment::from_literals([1, 2, 3, 4]));
    }

    #[test]
    fn disagreeing_streams_remain() {
        let formula = Formula::from_clauses(vec![vec![1, 2, 3, 4]]);
        let mut config = orchestrator_only();
        config.merging_threshold.value = 0.0;
        let mut ctx = Context::from_formula(config, formula, None);

        ctx.pool.add(Assignment::from_literals([1, 2, 3, 4]));
        ctx.pool.add(Assignment::from_literals([-1, -2, -3, -4]));

        assert_eq!(ctx.merge_pass(), 0);
        assert_eq!(ctx.pool.len(), 2);
    }
}

mod branch {
    use super::*;

    #[test]
    fn split_on_first_unassigned_atom() {
        let formula = Formula::from_clauses(vec![vec![1, 2], vec![-2, 3]]);
        let mut ctx = Context::from_formula(orchestrator_only(), formula, None);

        let source = ctx.pool.add(Assignment::from_literals([1]));
        let child = ctx.branch_smallest().expect("a split");

        let child = ctx
            .pool
            .streams()
            .into_iter()
            .find(|stream| stream.id() == child)
            .expect("child stream");

        assert_eq!(child.snapshot(), Assignment::from_literals([1, 2, 3]));
        assert_eq!(source.snapshot(), Assignment::from_literals([1, -2]));
        assert_eq!(ctx.counters.additions, 1);
        assert!(!child.is_marked());
        assert!(!source.is_marked());
    }

    #[test]
    fn inconsistent_half_is_marked() {
        let formula = Formula::from_clauses(vec![vec![-1, 2], vec![-1, -2], vec![1, 3]]);
        let mut ctx = Context::from_formula(orchestrator_only(), formula, None);

        let source = ctx.pool.add(Assignment::default());
        let child = ctx.branch_smallest().expect("a split");

        assert!(ctx.pool.contains(child));
        let child = ctx
            .pool
            .streams()
            .into_iter()
            .find(|stream| stream.id() == child)
            .expect("child stream");

        assert_eq!(child.mark_reason(), Some(DeletionReason::LocalConflict));
        assert_eq!(source.snapshot(), Assignment::from_literals([-1, 3]));
        assert!(!source.is_marked());
    }

    #[test]
    fn full_stream_is_not_split() {
        let formula = Formula::from_clauses(vec![vec![1, 2]]);
        let mut ctx = Context::from_formula(orchestrator_only(), formula, None);

        ctx.pool.add(Assignment::from_literals([1, -2]));
        assert_eq!(ctx.branch_smallest(), None);
        assert_eq!(ctx.pool.len(), 1);
    }
}

mod deletion {
    use super::*;

    #[test]
    fn sweep_recomputes_global() {
        let formula = Formula::from_clauses(vec![vec![1, 2, 3]]);
        let mut ctx = Context::from_formula(orchestrator_only(), formula, None);

        let kept = ctx.pool.add(Assignment::from_literals([1, 2]));
        let dropped = ctx.pool.add(Assignment::from_literals([-1, 2]));
        ctx.recompute_global();
        assert_eq!(ctx.init, Assignment::from_literals([2]));

        ctx.mark_stream(&dropped, DeletionReason::LocalUnsat);
        assert_eq!(ctx.sweep_marked(), 1);
        assert_eq!(ctx.counters.deletions, 1);

        assert!(ctx.pool.contains(kept.id()));
        assert_eq!(ctx.init, Assignment::from_literals([1, 2]));
    }

    #[test]
    fn reseed_from_root() {
        let formula = Formula::from_clauses(vec![vec![1], vec![-1, 2], vec![2, 3, 4]]);
        let mut ctx = Context::from_formula(orchestrator_only(), formula, None);

        ctx.reseed();

        assert_eq!(ctx.pool.len(), 1);
        assert_eq!(ctx.counters.reseeds, 1);
        assert_eq!(ctx.init, ctx.root);
        assert_eq!(ctx.root, Assignment::from_literals([1, 2]));
    }
}

mod global {
    use super::*;

    #[test]
    fn global_assignment_in_every_stream() {
        let formula = planted_formula(29, 20, 85);
        let mut ctx = Context::from_formula(orchestrator_only(), formula, None);

        ctx.pool.add(ctx.root.clone());
        ctx.recompute_global();

        for _ in 0..40 {
            if ctx.completion.is_complete() {
                break;
            }
            ctx.pass(None);

            for stream in ctx.pool.unmarked() {
                assert!(
                    stream.with_assignment(|assignment| ctx.init.is_subset(assignment)),
                    "stream {} lost part of the global assignment",
                    stream.id()
                );
            }
        }
    }

    #[test]
    fn planted_formula_is_solved() {
        let formula = planted_formula(61, 25, 100);
        let mut ctx = Context::from_formula(orchestrator_only(), formula, None);

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert!(ctx.model().is_ok_and(|model| ctx.formula.satisfied_by(&model)));
        assert!(ctx.counters.passes > 0);
    }
}

mod step {
    use super::*;

    /// An oracle which never decides anything.
    struct Undecided;

    impl Oracle for Undecided {
        fn from_formula(_: &Formula, _: Option<Duration>) -> Self {
            Undecided
        }

        fn solve_given(&mut self, _: &Assignment) -> OracleReport {
            OracleReport::Unknown
        }

        fn set_time_limit(&mut self, _: Option<Duration>) {}

        fn set_callback_terminate(&mut self, _: Box<CallbackTerminate>) {}
    }

    /// Pairs of atoms where lookahead on either atom of a pair forces both.
    fn pairs() -> Formula {
        let mut clauses = Vec::default();
        for (a, b) in [(1, 2), (3, 4), (5, 6)] {
            clauses.push(vec![a, b]);
            clauses.push(vec![a, -b]);
            clauses.push(vec![-a, b]);
        }
        Formula::from_clauses(clauses)
    }

    #[test]
    fn each_window_grows_the_stream() {
        let mut config = orchestrator_only();
        assert!(config.window_size.set(1).is_ok());
        let mut ctx = GenericContext::<Undecided>::from_formula(config, pairs(), None);

        let stream = ctx.pool.add(Assignment::default());
        assert_eq!(ctx.step_stream(&stream, 2, false), Step::Grown(4));

        assert_eq!(ctx.counters.propagations, 2);
        assert_eq!(stream.len(), 4);
        assert!(!stream.is_marked());
    }

    #[test]
    fn full_stream_after_growth_completes() {
        let mut config = orchestrator_only();
        assert!(config.window_size.set(1).is_ok());
        let mut ctx = GenericContext::<Undecided>::from_formula(config, pairs(), None);

        let stream = ctx.pool.add(Assignment::default());
        assert_eq!(ctx.step_stream(&stream, 3, true), Step::Completed);
        assert_eq!(ctx.model(), Ok(Assignment::from_literals([1, 2, 3, 4, 5, 6])));
    }
}
