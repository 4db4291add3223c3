/*!
Databases for holding information relevant to a search.

For the moment, this is limited to the [clause database](clause), which pairs the clauses of a formula with an index from each literal to the clauses containing the literal.
The database is built once for a formula, is never mutated, and is shared by all threads of a search.
*/

pub mod clause;

/// The key of a clause in the [clause database](clause::ClauseDB), its position in the canonical order of the formula.
pub type ClauseKey = usize;
