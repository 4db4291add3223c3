//! Key structures, such as literals, clauses, assignments and formulas.
//!
//! Two structures share a representation, a collection of literals, while differing in meaning:
//! - A [clause](clause) is a disjunction of literals, and a formula is a conjunction of clauses.
//! - An [assignment](assignment) is a conjunction of literals, and is the state of a stream.
//!
//! The two are kept as distinct types, as mistaking one for the other inverts the logic of any procedure which does so.

pub mod assignment;
pub mod atom;
pub mod clause;
pub mod formula;
pub mod literal;
