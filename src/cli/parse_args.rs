use std::{path::PathBuf, time::Duration};

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use stream_sat::{
    config::{Config, ConfigOption},
    types::err::ErrorKind,
};

/// Options of the cli which are not part of the config of a context.
#[derive(Clone, Debug, Default)]
pub struct CliOptions {
    /// The DIMACS file to read.
    pub path: PathBuf,

    /// Print progress and rates as the search runs.
    pub show_stats: bool,

    /// Print the model of a satisfiable formula.
    pub show_model: bool,
}

pub fn cli() -> Command {
    let defaults = Config::default();

    Command::new("stream_sat")
        .about("Searches for a satisfying assignment of a formula by growing a pool of candidate assignments")
        .version(env!("CARGO_PKG_VERSION"))

        .arg(Arg::new("path")
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("The DIMACS form CNF file to parse, optionally compressed with xz."))

        .arg(Arg::new("seed")
            .long("seed")
            .value_parser(value_parser!(u64))
            .num_args(1)
            .help(format!("The seed of the source of rng.
Default: {}", defaults.seed.value)))

        .arg(Arg::new("merging_threshold")
            .long("merging-threshold")
            .value_parser(value_parser!(f64))
            .num_args(1)
            .help(format!("The proportion of the distance from the average to the maximum stream size which streams must exceed to be merged.
Default: {}", defaults.merging_threshold.value)))

        .arg(Arg::new("branching_chance")
            .long("branching-chance")
            .value_parser(value_parser!(f64))
            .num_args(1)
            .help(format!("The probability of splitting the smallest stream after each stream step.
Default: {}", defaults.branching_chance.value)))

        .arg(Arg::new("window_size")
            .long("window-size")
            .short('k')
            .value_parser(value_parser!(usize))
            .num_args(1)
            .help(format!("The count of atoms in each lookahead window.
Default: {}

Each of the 2^k valuations of the window is closed, so each increment doubles the cost of a lookahead.", defaults.window_size.value)))

        .arg(Arg::new("fast_verifiers")
            .long("fast-verifiers")
            .value_parser(value_parser!(usize))
            .num_args(1)
            .help(format!("The count of verifier threads with a short time limit.
Default: {}", defaults.fast_verifiers.value)))

        .arg(Arg::new("slow_verifiers")
            .long("slow-verifiers")
            .value_parser(value_parser!(usize))
            .num_args(1)
            .help(format!("The count of verifier threads with a long time limit.
Default: {}", defaults.slow_verifiers.value)))

        .arg(Arg::new("fast_time_limit")
            .long("fast-time-limit")
            .value_name("MILLISECONDS")
            .value_parser(value_parser!(u64))
            .num_args(1)
            .help(format!("The time limit of each call by a fast verifier.
Default: {}", defaults.fast_time_limit.value.as_millis())))

        .arg(Arg::new("slow_time_limit")
            .long("slow-time-limit")
            .value_name("MILLISECONDS")
            .value_parser(value_parser!(u64))
            .num_args(1)
            .help(format!("The time limit of each call by a slow verifier, and on exhaustion of the pool.
Default: {}", defaults.slow_time_limit.value.as_millis())))

        .arg(Arg::new("inline_time_limit")
            .long("inline-time-limit")
            .value_name("MILLISECONDS")
            .value_parser(value_parser!(u64))
            .num_args(1)
            .help(format!("The time limit of each call to check a grown stream.
Default: {}", defaults.inline_time_limit.value.as_millis())))

        .arg(Arg::new("ordering_cooldown")
            .long("ordering-cooldown")
            .value_name("SECONDS")
            .value_parser(value_parser!(u64))
            .num_args(1)
            .help(format!("The minimum time between recomputations of the variable ordering.
Default: {}", defaults.ordering_cooldown.value.as_secs())))

        .arg(Arg::new("checkpoint_interval")
            .long("checkpoint-interval")
            .value_name("SECONDS")
            .value_parser(value_parser!(u64))
            .num_args(1)
            .help(format!("The minimum time between checkpoints.
Default: {}", defaults.checkpoint_interval.value.as_secs())))

        .arg(Arg::new("checkpoint_directory")
            .long("checkpoint-dir")
            .value_parser(value_parser!(PathBuf))
            .num_args(1)
            .help(format!("The directory within which checkpoints are kept.
Default: {:?}", defaults.checkpoint_directory)))

        .arg(Arg::new("no_checkpoints")
            .long("no-checkpoints")
            .action(ArgAction::SetTrue)
            .help("Neither resume from nor write checkpoints."))

        .arg(Arg::new("time_limit")
            .long("time-limit")
            .short('t')
            .value_name("SECONDS")
            .value_parser(value_parser!(u64))
            .num_args(1)
            .help("The time limit of the search, after which a checkpoint is written.
By default the search runs until complete."))

        .arg(Arg::new("stats")
            .long("stats")
            .short('s')
            .action(ArgAction::SetTrue)
            .help("Display progress and rates during the search."))

        .arg(Arg::new("no_model")
            .long("no-model")
            .action(ArgAction::SetTrue)
            .help("Do not display the model of a satisfiable formula."))
}

/// Sets `option` to the value of `id`, if given.
fn set_from<T, A>(args: &ArgMatches, id: &str, option: &mut ConfigOption<T>, convert: impl Fn(A) -> T) -> Result<(), ErrorKind>
where
    T: Clone + PartialOrd + std::fmt::Debug,
    A: Clone + Send + Sync + 'static,
{
    if let Ok(Some(value)) = args.try_get_one::<A>(id) {
        option.set(convert(value.clone()))?;
    }
    Ok(())
}

/// The config of a context and the options of the cli, from `args`.
///
/// The cli writes checkpoints unless asked not to.
pub fn config_from_args(args: &ArgMatches) -> Result<(Config, CliOptions), ErrorKind> {
    let mut the_config = Config::default();
    the_config.checkpoints.value = true;

    set_from(args, "seed", &mut the_config.seed, |seed: u64| seed)?;
    set_from(args, "merging_threshold", &mut the_config.merging_threshold, |t: f64| t)?;
    set_from(args, "branching_chance", &mut the_config.branching_chance, |p: f64| p)?;
    set_from(args, "window_size", &mut the_config.window_size, |k: usize| k)?;
    set_from(args, "fast_verifiers", &mut the_config.fast_verifiers, |n: usize| n)?;
    set_from(args, "slow_verifiers", &mut the_config.slow_verifiers, |n: usize| n)?;

    set_from(args, "fast_time_limit", &mut the_config.fast_time_limit, Duration::from_millis)?;
    set_from(args, "slow_time_limit", &mut the_config.slow_time_limit, Duration::from_millis)?;
    set_from(args, "inline_time_limit", &mut the_config.inline_time_limit, Duration::from_millis)?;
    set_from(args, "ordering_cooldown", &mut the_config.ordering_cooldown, Duration::from_secs)?;
    set_from(args, "checkpoint_interval", &mut the_config.checkpoint_interval, Duration::from_secs)?;
    set_from(args, "time_limit", &mut the_config.time_limit, Duration::from_secs)?;

    if let Ok(Some(directory)) = args.try_get_one::<PathBuf>("checkpoint_directory") {
        the_config.checkpoint_directory = directory.clone();
    }

    if args.get_flag("no_checkpoints") {
        the_config.checkpoints.value = false;
    }

    let cli_options = CliOptions {
        path: args.get_one::<PathBuf>("path").cloned().unwrap_or_default(),
        show_stats: args.get_flag("stats"),
        show_model: !args.get_flag("no_model"),
    };

    Ok((the_config, cli_options))
}
