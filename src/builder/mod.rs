//! Tools for building a context.
//!
//! - [dimacs] reads a formula written in the DIMACS CNF format, either to a [ParsedDimacs](dimacs::ParsedDimacs) or directly to a context.

pub mod dimacs;
