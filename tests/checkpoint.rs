use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::Duration,
};

use stream_sat::{
    checkpoint::CheckpointStore,
    config::Config,
    context::Context,
    dispatch::{
        library::report::{self, Report as DispatchReport},
        Dispatch, Dispatcher,
    },
    pool::DeletionReason,
    reports::Report,
    structures::{assignment::Assignment, formula::Formula},
};

fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("stream_sat_tests_{name}_{}", std::process::id()))
}

fn checkpointing(directory: &Path) -> Config {
    let mut config = Config::default();
    config.fast_verifiers.value = 0;
    config.slow_verifiers.value = 0;
    config.time_limit.value = Duration::from_secs(60);
    config.checkpoints.value = true;
    config.checkpoint_directory = directory.to_path_buf();
    config
}

fn scenario() -> Formula {
    Formula::from_clauses(vec![vec![1, 2], vec![-1, 2], vec![-2, 3]])
}

mod checkpoint {
    use super::*;

    #[test]
    fn resume_from_solution() {
        let root = scratch("resume");
        let _ = fs::remove_dir_all(&root);

        let mut first = Context::from_formula(checkpointing(&root), scenario(), None);
        assert_eq!(first.solve(), Ok(Report::Satisfiable));
        assert!(first.counters.checkpoints > 0);
        let model = first.model().expect("a model");

        let store = first.checkpoints.as_ref().expect("a store");
        assert!(store.directory().join("solution.cnf").exists());
        assert!(store.directory().join("activeids.txt").exists());

        let mut second = Context::from_formula(checkpointing(&root), scenario(), None);
        assert!(second.restore_checkpoint());
        assert_eq!(second.pool.len(), 1);
        assert_eq!(second.pool.smallest().map(|stream| stream.snapshot()), Some(model.clone()));

        assert_eq!(second.solve(), Ok(Report::Satisfiable));
        assert_eq!(second.model(), Ok(model));

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn distinct_formulas_distinct_directories() {
        let root = scratch("distinct");
        let _ = fs::remove_dir_all(&root);

        let first = Context::from_formula(checkpointing(&root), scenario(), None);
        let other = Formula::from_clauses(vec![vec![1, -2]]);
        let second = Context::from_formula(checkpointing(&root), other, None);

        let directory = |ctx: &Context| ctx.checkpoints.as_ref().map(|store| store.directory().to_path_buf());
        assert_ne!(directory(&first), directory(&second));

        // Clause order does not matter.
        let shuffled = Formula::from_clauses(vec![vec![-2, 3], vec![2, 1], vec![-1, 2]]);
        let third = Context::from_formula(checkpointing(&root), shuffled, None);
        assert_eq!(directory(&first), directory(&third));
    }

    #[test]
    fn intersection_of_saved_streams() {
        let root = scratch("intersection");
        let _ = fs::remove_dir_all(&root);

        let store = CheckpointStore::new(&root, "abcd");
        let streams = vec![
            (3, Assignment::from_literals([1, 2, -4])),
            (8, Assignment::from_literals([1, -2, -4])),
            (9, Assignment::from_literals([1, 3, -4])),
        ];
        let common = Assignment::from_literals([1, -4]);
        assert!(store.save(&streams, &common).is_ok());

        let loaded = store.load().ok().flatten().expect("a checkpoint");
        assert_eq!(loaded.streams, streams);
        assert_eq!(loaded.solution, Some(common.clone()));

        let mut intersection = loaded.streams[0].1.clone();
        for (_, assignment) in &loaded.streams[1..] {
            intersection.intersect_with(assignment);
        }
        assert_eq!(intersection, common);

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn solution_matches_the_streams_written() {
        let root = scratch("solution_matches");
        let _ = fs::remove_dir_all(&root);

        let mut ctx = Context::from_formula(checkpointing(&root), Formula::from_clauses(vec![vec![1, 2]]), None);
        ctx.pool.add(Assignment::from_literals([1, 2]));
        let refuted = ctx.pool.add(Assignment::from_literals([1, -2]));
        ctx.recompute_global();
        assert_eq!(ctx.init.sorted_literals(), vec![1]);

        // The global assignment now lags the unmarked pool.
        assert!(refuted.mark(DeletionReason::OracleUnsat));
        assert!(ctx.save_checkpoint());

        let store = ctx.checkpoints.as_ref().expect("a store");
        let loaded = store.load().ok().flatten().expect("a checkpoint");
        assert_eq!(loaded.streams.len(), 1);

        let mut intersection = loaded.streams[0].1.clone();
        for (_, assignment) in &loaded.streams[1..] {
            intersection.intersect_with(assignment);
        }
        assert_eq!(loaded.solution, Some(intersection));
        assert_eq!(loaded.solution, Some(Assignment::from_literals([1, 2])));

        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn unreadable_checkpoint_starts_afresh() {
        let root = scratch("unreadable");
        let _ = fs::remove_dir_all(&root);

        let reports = Arc::new(Mutex::new(Vec::default()));
        let reports_clone = reports.clone();
        let dispatcher: Dispatcher = Arc::new(move |dispatch: Dispatch| {
            if let Dispatch::Report(DispatchReport::Checkpoint(checkpoint)) = dispatch {
                if let Ok(mut reports) = reports_clone.lock() {
                    reports.push(checkpoint);
                }
            }
        });

        let mut ctx = Context::from_formula(checkpointing(&root), scenario(), Some(dispatcher));
        let directory = ctx.checkpoints.as_ref().map(|store| store.directory().to_path_buf()).expect("a store");
        assert!(fs::create_dir_all(&directory).is_ok());
        assert!(fs::write(directory.join("activeids.txt"), "7\n").is_ok());

        assert!(!ctx.restore_checkpoint());
        assert!(ctx.pool.is_empty());

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));

        let reports = reports.lock().map(|reports| reports.clone()).unwrap_or_default();
        assert!(matches!(reports.first(), Some(report::Checkpoint::Failed(_))));
        assert!(reports.iter().any(|report| matches!(report, report::Checkpoint::Saved { .. })));

        let _ = fs::remove_dir_all(root);
    }
}
