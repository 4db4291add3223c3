/*!
Formulas, as conjunctions of clauses.

A formula is fixed once built.
On construction:
- The literals of each clause are sorted and duplicates removed.
- Tautologies (clauses containing a literal and its negation) are dropped, as they constrain nothing.
- Duplicate clauses are dropped.
- An empty clause is noted rather than stored, as a formula with an empty clause is unsatisfiable.

Clauses are stored in *canonical* order: by maximum literal, with ties broken lexicographically.
The canonical order is used to give each formula a stable [hash](Formula::hash_string), independent of the order clauses were read in.

# Example
```rust
# use stream_sat::structures::formula::Formula;
let formula = Formula::from_clauses(vec![vec![-2, 3], vec![2, 1, 1], vec![-1, 2], vec![1, -1]]);

assert_eq!(formula.clauses(), &[vec![-1, 2], vec![1, 2], vec![-2, 3]]);
assert_eq!(formula.atoms(), &[1, 2, 3]);
assert_eq!(formula.canonical_string(), "-1 2\n1 2\n-2 3");
```
*/

use std::hash::Hasher;

use fnv::{FnvHashSet, FnvHasher};

use crate::structures::{
    assignment::Assignment,
    atom::Atom,
    clause::{CClause, Clause},
    literal::{CLiteral, Literal},
};

/// A formula in conjunctive normal form.
#[derive(Clone, Debug)]
pub struct Formula {
    /// The (non-empty) clauses of the formula, in canonical order.
    clauses: Vec<CClause>,

    /// The distinct atoms of the formula, ascending.
    atoms: Vec<Atom>,

    /// The literals of unit clauses.
    units: Vec<CLiteral>,

    /// Whether an empty clause was part of the formula.
    empty_clause: bool,
}

impl Formula {
    /// A formula built from some collection of clauses, each some collection of literals.
    pub fn from_clauses<I, C>(clauses: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator<Item = CLiteral>,
    {
        let mut seen: FnvHashSet<CClause> = FnvHashSet::default();
        let mut kept = Vec::default();
        let mut atoms = FnvHashSet::default();
        let mut empty_clause = false;

        'clause_loop: for clause in clauses {
            let mut clause = clause.into_iter().collect::<CClause>();
            clause.sort_unstable();
            clause.dedup();

            if clause.is_empty() {
                empty_clause = true;
                continue;
            }

            // Sorted by integer value, so a complementary pair need not be adjacent.
            for literal in clause.iter().filter(|literal| literal.is_negative()) {
                if clause.binary_search(&literal.negate()).is_ok() {
                    continue 'clause_loop;
                }
            }

            if seen.insert(clause.clone()) {
                atoms.extend(clause.atoms());
                kept.push(clause);
            }
        }

        kept.sort_unstable_by(|a, b| a.last().cmp(&b.last()).then_with(|| a.cmp(b)));

        let mut atoms = atoms.into_iter().collect::<Vec<_>>();
        atoms.sort_unstable();

        let units = kept
            .iter()
            .filter(|clause| clause.len() == 1)
            .map(|clause| clause[0])
            .collect();

        Formula {
            clauses: kept,
            atoms,
            units,
            empty_clause,
        }
    }

    /// The clauses of the formula, in canonical order.
    pub fn clauses(&self) -> &[CClause] {
        &self.clauses
    }

    /// The distinct atoms of the formula, ascending.
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// A count of the distinct atoms of the formula.
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// The literals of each unit clause of the formula.
    pub fn units(&self) -> &[CLiteral] {
        &self.units
    }

    /// True if the formula contained an empty clause.
    pub fn has_empty_clause(&self) -> bool {
        self.empty_clause
    }

    /// Whether `atom` is an atom of the formula.
    pub fn has_atom(&self, atom: Atom) -> bool {
        self.atoms.binary_search(&atom).is_ok()
    }

    /// True if `assignment` is consistent and some literal of every clause is part of the assignment.
    pub fn satisfied_by(&self, assignment: &Assignment) -> bool {
        !self.empty_clause
            && assignment.is_consistent()
            && self.clauses.iter().all(|clause| clause.satisfied_by(assignment))
    }

    /// True if `assignment` assigns every atom of the formula, regardless of consistency.
    pub fn is_full(&self, assignment: &Assignment) -> bool {
        assignment.assigned_atom_count() >= self.atoms.len()
            && self.atoms.iter().all(|atom| assignment.is_assigned(*atom))
    }

    /// The clauses of the formula in canonical order, one to a line.
    ///
    /// If the formula contained an empty clause, the string begins with an empty line.
    pub fn canonical_string(&self) -> String {
        let mut lines = Vec::with_capacity(self.clauses.len() + 1);
        if self.empty_clause {
            lines.push(String::new());
        }
        lines.extend(self.clauses.iter().map(|clause| clause.as_dimacs(false)));
        lines.join("\n")
    }

    /// A hash of the [canonical string](Formula::canonical_string) of the formula, as sixteen hexadecimal digits.
    pub fn hash_string(&self) -> String {
        let mut hasher = FnvHasher::default();
        hasher.write(self.canonical_string().as_bytes());
        format!("{:016x}", hasher.finish())
    }

    /// The formula in DIMACS form.
    pub fn as_dimacs(&self) -> String {
        let max_atom = self.atoms.last().copied().unwrap_or(0);
        let count = self.clauses.len() + usize::from(self.empty_clause);
        let mut the_string = format!("p cnf {max_atom} {count}\n");
        if self.empty_clause {
            the_string.push_str("0\n");
        }
        for clause in &self.clauses {
            the_string.push_str(&clause.as_dimacs(true));
            the_string.push('\n');
        }
        the_string
    }
}
