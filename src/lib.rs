//! A library for searching for satisfying assignments of boolean formulas written in conjunctive normal form, by growing a pool of candidate partial assignments.
//!
//! stream_sat is a heuristic, parallel, satisfiability search.
//! Rather than a single trail of decisions, the search keeps a pool of *streams*, each a candidate partial assignment, and grows each stream by bounded lookahead propagation.
//! Streams which are found to be contradictory are deleted, streams which agree on much are merged, and the smallest stream is occasionally split in two.
//! Alongside, background verifier threads ask an exact oracle to extend randomly sampled streams to a full model, and the first full model found ends the search.
//!
//! The search is not, by itself, a decision procedure.
//! A verdict of unsatisfiability is only ever given by the exact oracle, and the propagation of the engine is an accelerator rather than a certificate.
//!
//! # Orientation
//!
//! The library is designed around the structure of a [context].
//!
//! Contexts are built from a configuration, a [formula](crate::structures::formula), and an optional method for recording [dispatches](crate::dispatch) from a solve.
//!
//! Useful starting points may be:
//! - The [solve procedure](crate::procedures::solve) for the dynamics of the search loop.
//! - The [propagation procedures](crate::procedures::closure) and [lookahead](crate::procedures::lookahead), the core inference of the search.
//! - The [stream pool](crate::pool), the shared state of the search.
//! - The [oracle] module, for the exact procedure used to verify streams.
//! - The [configuration](crate::config), to see what may be tuned.
//!
//! # Example
//!
//! ```rust
//! # use stream_sat::config::Config;
//! # use stream_sat::context::Context;
//! # use stream_sat::reports::Report;
//! # use stream_sat::structures::formula::Formula;
//! let formula = Formula::from_clauses(vec![vec![1, 2], vec![-1, 2], vec![-2, 3]]);
//!
//! let mut config = Config::default();
//! config.fast_verifiers.value = 0;
//! config.slow_verifiers.value = 0;
//!
//! let mut the_context = Context::from_formula(config, formula, None);
//!
//! assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
//!
//! let model = the_context.model().expect("a model");
//! assert!(model.contains(2));
//! assert!(model.contains(3));
//! ```
//!
//! # Concurrency
//!
//! The [orchestrator](crate::procedures::step) is the only writer of pool membership and of stream assignments.
//! Verifier threads only ever mark a stream for deletion, or claim completion.
//! Completion is claimed at most once, and whichever thread claims first fixes the result of the search.

#![allow(clippy::collapsible_else_if)]
#![allow(clippy::single_match)]

pub mod builder;
pub mod procedures;

pub mod config;
pub mod context;
pub mod structures;
pub mod types;

pub mod generic;

pub mod dispatch;

pub mod checkpoint;
pub mod db;
pub mod oracle;
pub mod pool;

pub mod misc;
pub mod reports;
