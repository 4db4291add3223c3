//! The library of dispatches.

pub mod delta;
pub mod report;
pub mod stat;
