#[cfg(not(target_env = "msvc"))]
#[cfg(feature = "jemalloc")]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = Jemalloc;

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    sync::Arc,
    thread,
};

use crossbeam::channel::unbounded;

use stream_sat::{
    config::Config,
    context::Context,
    dispatch::{
        library::report::{self, Report as DispatchReport},
        Dispatch, Dispatcher,
    },
    reports::Report,
    types::err::ErrorKind,
};

mod parse_args;
mod records;

fn main() {
    #[cfg(feature = "log")]
    env_logger::init();

    let matches = parse_args::cli().get_matches();

    let (config, cli_options) = match parse_args::config_from_args(&matches) {
        Ok(configs) => configs,
        Err(e) => {
            println!("c {e}");
            std::process::exit(1);
        }
    };

    let (tx, rx) = unbounded::<Dispatch>();
    let recorder = {
        let show_stats = cli_options.show_stats;
        thread::spawn(move || records::general_recorder(rx, show_stats))
    };
    let dispatcher: Dispatcher = Arc::new(move |dispatch: Dispatch| {
        let _ = tx.send(dispatch);
    });

    let mut the_context = match load_context(config, &cli_options.path, dispatcher.clone()) {
        Ok(context) => context,
        Err(e) => {
            println!("c Error loading DIMACS: {e}");
            std::process::exit(1);
        }
    };

    let report = match the_context.solve() {
        Ok(report) => report,
        Err(e) => {
            println!("c Solve error: {e}");
            std::process::exit(2);
        }
    };

    // The context holds a clone of the dispatcher, so the recorder is only joined after the finish report.
    let _ = recorder.join();

    match report {
        Report::Satisfiable => {
            println!("s SATISFIABLE");
            if cli_options.show_model {
                if let Ok(valuation) = the_context.valuation_string() {
                    println!("v {valuation} 0");
                }
            }
            std::process::exit(10)
        }

        Report::Unsatisfiable => {
            println!("s UNSATISFIABLE");
            std::process::exit(20)
        }

        Report::Unknown => {
            println!("s UNKNOWN");
            std::process::exit(30)
        }
    }
}

/// A context for the DIMACS file at `path`, decompressing the file if the extension is `xz`.
fn load_context(config: Config, path: &Path, dispatcher: Dispatcher) -> Result<Context, ErrorKind> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            println!("c Failed to open {}: {e}", path.display());
            std::process::exit(1);
        }
    };

    dispatcher(Dispatch::Report(DispatchReport::Parser(report::Parser::Load(
        path.display().to_string(),
    ))));

    let reader: Box<dyn BufRead> = match path.extension() {
        #[cfg(feature = "xz")]
        Some(extension) if extension == "xz" => Box::new(BufReader::new(xz2::read::XzDecoder::new(file))),

        _ => Box::new(BufReader::new(file)),
    };

    Context::from_dimacs(config, reader, Some(dispatcher))
}
