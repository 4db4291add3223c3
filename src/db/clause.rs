/*!
A database of clauses, indexed by literal.

The clause database answers "which clauses contain literal ℓ" in constant time, which is the only question asked of the formula during [closure](crate::procedures::closure).

Methods to propagate with respect to the database are implemented in [procedures](crate::procedures), as with [close](ClauseDB::close) and [ranged_propagation](ClauseDB::ranged_propagation).

# Example
```rust
# use stream_sat::db::clause::ClauseDB;
# use stream_sat::structures::formula::Formula;
let formula = Formula::from_clauses(vec![vec![1, 2], vec![-1, 2], vec![-2, 3]]);
let clause_db = ClauseDB::from_formula(&formula);

assert_eq!(clause_db.occurrences(2).len(), 2);
assert_eq!(clause_db.occurrences(-3).len(), 0);
```
*/

use fnv::FnvHashMap;

use crate::{
    db::ClauseKey,
    structures::{atom::Atom, clause::CClause, formula::Formula, literal::CLiteral},
};

/// The clause database.
pub struct ClauseDB {
    /// The clauses of the formula, in canonical order.
    clauses: Vec<CClause>,

    /// For each literal, the keys of clauses containing the literal.
    occurrences: FnvHashMap<CLiteral, Vec<ClauseKey>>,

    /// The atoms of the formula, ascending.
    atoms: Vec<Atom>,
}

impl ClauseDB {
    /// A clause database for the clauses of `formula`.
    pub fn from_formula(formula: &Formula) -> Self {
        let clauses = formula.clauses().to_vec();
        let mut occurrences: FnvHashMap<CLiteral, Vec<ClauseKey>> = FnvHashMap::default();

        for (key, clause) in clauses.iter().enumerate() {
            for literal in clause {
                occurrences.entry(*literal).or_default().push(key);
            }
        }

        ClauseDB {
            clauses,
            occurrences,
            atoms: formula.atoms().to_vec(),
        }
    }

    /// The clause indexed by `key`, if it exists.
    pub fn get(&self, key: ClauseKey) -> Option<&CClause> {
        self.clauses.get(key)
    }

    /// The keys of all clauses containing `literal`.
    pub fn occurrences(&self, literal: CLiteral) -> &[ClauseKey] {
        match self.occurrences.get(&literal) {
            Some(keys) => keys,
            None => &[],
        }
    }

    /// The atoms of the formula, ascending.
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// A count of the clauses in the database.
    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }
}
