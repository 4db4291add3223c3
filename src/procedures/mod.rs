//! Various procedures for searching within a context.
//!
//! For the most part these are methods accessed via a context, and primarily placed here for documentation.
//!
//! Propagation:
//! - [closure], unit propagation of an assignment.
//! - [lookahead], bounded lookahead over a window of atoms.
//!
//! Dynamics of the pool:
//! - [step], growth of a single stream.
//! - [merge], [branch] and [deletion] of streams.
//! - [broadcast] of literals forced on the global assignment.
//! - [ordering] of atoms, from which windows are taken.
//!
//! The search:
//! - [solve], the loop of the orchestrator.
//! - [verifier], the loop of each background verifier thread.
//! - [snapshot], checkpoints of the pool.

pub mod closure;
pub mod lookahead;

pub mod branch;
pub mod broadcast;
pub mod deletion;
pub mod merge;
pub mod ordering;
pub mod step;

pub mod snapshot;
pub mod solve;
pub mod verifier;
