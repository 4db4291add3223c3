/*!
Clauses, as disjunctions of literals.

The canonical representation of a clause is a vector of literals, kept in ascending order without duplicates once part of a [formula](crate::structures::formula).

# Example
```rust
# use stream_sat::structures::clause::{CClause, Clause};
# use stream_sat::structures::assignment::Assignment;
let clause: CClause = vec![-2, 1, 3];
assert_eq!(clause.as_dimacs(true), "-2 1 3 0");

let assignment = Assignment::from_literals([2, -1]);
assert!(!clause.satisfied_by(&assignment));
assert_eq!(clause.candidates(&assignment).collect::<Vec<_>>(), vec![3]);
```
*/

use crate::structures::{
    assignment::Assignment,
    atom::Atom,
    literal::{CLiteral, Literal},
};

/// The canonical representation of a clause.
pub type CClause = Vec<CLiteral>;

/// Methods common to collections of literals read as a disjunction.
pub trait Clause {
    /// The clause as a string of DIMACS literals, optionally terminated by a zero.
    fn as_dimacs(&self, zero: bool) -> String;

    /// An iterator over the literals of the clause.
    fn literals(&self) -> impl Iterator<Item = CLiteral>;

    /// An iterator over the atoms of the clause.
    fn atoms(&self) -> impl Iterator<Item = Atom> {
        self.literals().map(|literal| literal.atom())
    }

    /// Whether some literal of the clause is part of `assignment`.
    fn satisfied_by(&self, assignment: &Assignment) -> bool {
        self.literals().any(|literal| assignment.contains(literal))
    }

    /// The literals of the clause whose negation is not part of `assignment`.
    ///
    /// If the clause is not satisfied and a single candidate remains, the candidate is forced.
    fn candidates<'a>(&'a self, assignment: &'a Assignment) -> impl Iterator<Item = CLiteral> + 'a {
        self.literals()
            .filter(move |literal| !assignment.contains(literal.negate()))
    }
}

impl Clause for [CLiteral] {
    fn as_dimacs(&self, zero: bool) -> String {
        let mut the_string = String::new();
        for literal in self {
            the_string.push_str(&format!("{literal} "));
        }
        match zero {
            true => the_string.push('0'),
            false => {
                the_string.pop();
            }
        }
        the_string
    }

    fn literals(&self) -> impl Iterator<Item = CLiteral> {
        self.iter().copied()
    }
}

impl Clause for CClause {
    fn as_dimacs(&self, zero: bool) -> String {
        self.as_slice().as_dimacs(zero)
    }

    fn literals(&self) -> impl Iterator<Item = CLiteral> {
        self.iter().copied()
    }
}
