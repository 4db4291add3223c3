use std::{fs::File, io::BufReader, path::Path, time::Duration};

use stream_sat::{config::Config, context::Context, reports::Report};

fn orchestrator_only() -> Config {
    let mut config = Config::default();
    config.fast_verifiers.value = 0;
    config.slow_verifiers.value = 0;
    config.time_limit.value = Duration::from_secs(60);
    config
}

fn solve_file(path: &Path, config: Config) -> Report {
    let file = File::open(path).expect("cnf file");
    let mut ctx = Context::from_dimacs(config, BufReader::new(file), None).expect("parsed cnf");
    let report = ctx.solve().expect("solve");

    if report == Report::Satisfiable {
        let model = ctx.model().expect("a model");
        assert!(ctx.formula.satisfied_by(&model), "{path:?}");
    }
    report
}

fn cnf_files(pattern: &str) -> Vec<std::path::PathBuf> {
    let files = glob::glob(pattern)
        .expect("pattern")
        .flatten()
        .collect::<Vec<_>>();
    assert!(!files.is_empty(), "no files match {pattern}");
    files
}

mod sat {
    use super::*;

    const PATTERN: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/cnf/sat/*.cnf");

    #[test]
    fn orchestrator() {
        for path in cnf_files(PATTERN) {
            assert_eq!(solve_file(&path, orchestrator_only()), Report::Satisfiable, "{path:?}");
        }
    }

    #[test]
    fn with_verifiers() {
        for path in cnf_files(PATTERN) {
            let mut config = Config::default();
            config.time_limit.value = Duration::from_secs(60);
            assert_eq!(solve_file(&path, config), Report::Satisfiable, "{path:?}");
        }
    }
}

mod unsat {
    use super::*;

    const PATTERN: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/cnf/unsat/*.cnf");

    #[test]
    fn orchestrator() {
        for path in cnf_files(PATTERN) {
            assert_eq!(solve_file(&path, orchestrator_only()), Report::Unsatisfiable, "{path:?}");
        }
    }

    #[test]
    fn with_verifiers() {
        for path in cnf_files(PATTERN) {
            let mut config = Config::default();
            config.time_limit.value = Duration::from_secs(60);
            assert_eq!(solve_file(&path, config), Report::Unsatisfiable, "{path:?}");
        }
    }
}

mod seeds {
    use super::*;

    #[test]
    fn reproducible_without_verifiers() {
        let path = Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/cnf/sat/implications.cnf"));

        let run = || {
            let file = File::open(path).expect("cnf file");
            let mut config = orchestrator_only();
            config.seed.value = 1234;
            let mut ctx = Context::from_dimacs(config, BufReader::new(file), None).expect("parsed cnf");
            let report = ctx.solve().expect("solve");
            (report, ctx.counters.passes, ctx.model())
        };

        assert_eq!(run(), run());
    }
}
