/*!
Assignments, as conjunctions of literals.

An assignment is the state of a [stream](crate::pool::Stream), and of the globally certain assignment of a search.

An assignment is *consistent* if it never contains both a literal and its negation.
Assignments are free to become inconsistent, as inconsistency is the signal that some line of search has failed, and so a count of conflicting pairs is maintained alongside the literals to make checking consistency constant time.

# Example
```rust
# use stream_sat::structures::assignment::Assignment;
let mut assignment = Assignment::from_literals([1, -2]);
assert!(assignment.is_consistent());
assert_eq!(assignment.value_of(2), Some(false));

assignment.insert(2);
assert!(!assignment.is_consistent());
assert_eq!(assignment.value_of(2), None);
assert_eq!(assignment.assigned_atom_count(), 2);
```
*/

use fnv::FnvHashSet;

use crate::structures::{
    atom::Atom,
    literal::{CLiteral, Literal},
};

/// A set of literals, read as a conjunction.
#[derive(Clone, Debug, Default)]
pub struct Assignment {
    literals: FnvHashSet<CLiteral>,

    /// The count of atoms with both polarities present.
    conflicts: usize,
}

impl Assignment {
    /// An assignment with capacity for at least `capacity` literals.
    pub fn with_capacity(capacity: usize) -> Self {
        Assignment {
            literals: FnvHashSet::with_capacity_and_hasher(capacity, Default::default()),
            conflicts: 0,
        }
    }

    /// An assignment of each of the given literals.
    pub fn from_literals(literals: impl IntoIterator<Item = CLiteral>) -> Self {
        let mut assignment = Assignment::default();
        assignment.extend(literals);
        assignment
    }

    /// Adds `literal` to the assignment, returning true if the literal was not already present.
    pub fn insert(&mut self, literal: CLiteral) -> bool {
        match self.literals.insert(literal) {
            true => {
                if self.literals.contains(&literal.negate()) {
                    self.conflicts += 1;
                }
                true
            }
            false => false,
        }
    }

    /// Whether `literal` is part of the assignment.
    pub fn contains(&self, literal: CLiteral) -> bool {
        self.literals.contains(&literal)
    }

    /// Whether some literal of `atom` is part of the assignment.
    pub fn is_assigned(&self, atom: Atom) -> bool {
        self.contains(CLiteral::new(atom, true)) || self.contains(CLiteral::new(atom, false))
    }

    /// The value of `atom`, if the assignment contains exactly one literal of the atom.
    pub fn value_of(&self, atom: Atom) -> Option<bool> {
        match (
            self.contains(CLiteral::new(atom, true)),
            self.contains(CLiteral::new(atom, false)),
        ) {
            (true, false) => Some(true),
            (false, true) => Some(false),
            _ => None,
        }
    }

    /// A count of the literals in the assignment.
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// A count of the atoms with some literal in the assignment.
    pub fn assigned_atom_count(&self) -> usize {
        self.literals.len() - self.conflicts
    }

    /// True, if the assignment never contains both a literal and its negation.
    pub fn is_consistent(&self) -> bool {
        self.conflicts == 0
    }

    /// An iterator over the literals of the assignment, in no particular order.
    pub fn literals(&self) -> impl Iterator<Item = CLiteral> + '_ {
        self.literals.iter().copied()
    }

    /// The literals of the assignment, ordered by atom and then polarity.
    pub fn sorted_literals(&self) -> Vec<CLiteral> {
        let mut literals = self.literals.iter().copied().collect::<Vec<_>>();
        literals.sort_unstable_by_key(|literal| (literal.atom(), literal.polarity()));
        literals
    }

    /// Whether every literal of the assignment is part of `other`.
    pub fn is_subset(&self, other: &Assignment) -> bool {
        self.len() <= other.len() && self.literals.iter().all(|literal| other.contains(*literal))
    }

    /// The literals common to both the assignment and `other`.
    pub fn intersection(&self, other: &Assignment) -> Assignment {
        let (smaller, larger) = match self.len() <= other.len() {
            true => (self, other),
            false => (other, self),
        };
        Assignment::from_literals(smaller.literals().filter(|literal| larger.contains(*literal)))
    }

    /// Removes every literal which is not part of `other`.
    pub fn intersect_with(&mut self, other: &Assignment) {
        self.literals.retain(|literal| other.contains(*literal));
        self.recount_conflicts();
    }

    /// The literals of the assignment which are not part of `other`, ordered by atom.
    pub fn difference(&self, other: &Assignment) -> Vec<CLiteral> {
        let mut fresh = self
            .literals()
            .filter(|literal| !other.contains(*literal))
            .collect::<Vec<_>>();
        fresh.sort_unstable_by_key(|literal| (literal.atom(), literal.polarity()));
        fresh
    }

    /// The assignment as a sequence of DIMACS unit clauses, one to a line.
    pub fn as_dimacs_units(&self) -> String {
        let mut the_string = String::new();
        for literal in self.sorted_literals() {
            the_string.push_str(&format!("{literal} 0\n"));
        }
        the_string
    }

    /// The assignment as a single line of DIMACS literals, without a terminating zero.
    pub fn valuation_string(&self) -> String {
        self.sorted_literals()
            .iter()
            .map(|literal| literal.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn recount_conflicts(&mut self) {
        self.conflicts = self
            .literals
            .iter()
            .filter(|literal| literal.is_positive() && self.literals.contains(&literal.negate()))
            .count();
    }
}

impl PartialEq for Assignment {
    fn eq(&self, other: &Self) -> bool {
        self.literals == other.literals
    }
}

impl Eq for Assignment {}

impl Extend<CLiteral> for Assignment {
    fn extend<T: IntoIterator<Item = CLiteral>>(&mut self, iter: T) {
        for literal in iter {
            self.insert(literal);
        }
    }
}

impl FromIterator<CLiteral> for Assignment {
    fn from_iter<T: IntoIterator<Item = CLiteral>>(iter: T) -> Self {
        Assignment::from_literals(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflicts_are_counted_once_per_atom() {
        let mut assignment = Assignment::from_literals([1, -1, 2]);
        assert_eq!(assignment.conflicts, 1);
        assert!(!assignment.insert(-1));
        assert_eq!(assignment.conflicts, 1);
        assignment.insert(-2);
        assert_eq!(assignment.conflicts, 2);
        assert_eq!(assignment.assigned_atom_count(), 2);
    }

    #[test]
    fn intersection_restores_consistency() {
        let mut a = Assignment::from_literals([1, -1, 2, 3]);
        let b = Assignment::from_literals([1, 2, -3]);
        assert_eq!(a.intersection(&b), Assignment::from_literals([1, 2]));

        a.intersect_with(&b);
        assert!(a.is_consistent());
        assert_eq!(a.sorted_literals(), vec![1, 2]);
    }

    #[test]
    fn difference_and_subset() {
        let a = Assignment::from_literals([4, -2, 1]);
        let b = Assignment::from_literals([1]);
        assert_eq!(a.difference(&b), vec![-2, 4]);
        assert!(b.is_subset(&a));
        assert!(!a.is_subset(&b));
    }

    #[test]
    fn dimacs_units() {
        let a = Assignment::from_literals([3, -1]);
        assert_eq!(a.as_dimacs_units(), "-1 0\n3 0\n");
        assert_eq!(a.valuation_string(), "-1 3");
    }
}
