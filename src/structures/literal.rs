/*!
Literals, as signed integers.

The magnitude of a literal is an [atom](crate::structures::atom) and the sign of a literal is its polarity.
A positive literal asserts the atom is true, and a negative literal asserts the atom is false.

```rust
# use stream_sat::structures::literal::{CLiteral, Literal};
let p = CLiteral::new(7, false);
assert_eq!(p, -7);
assert_eq!(p.atom(), 7);
assert!(!p.polarity());
assert_eq!(p.negate(), 7);
```
*/

use crate::structures::atom::Atom;

/// The canonical representation of a literal.
pub type CLiteral = i32;

/// Something which has methods for returning an atom and a polarity, etc.
pub trait Literal: Copy + std::cmp::Ord + std::hash::Hash {
    /// A fresh literal, specified by pairing an atom with a boolean.
    fn new(atom: Atom, polarity: bool) -> Self;

    /// The negation of the literal.
    fn negate(&self) -> Self;

    /// The atom of the literal.
    fn atom(&self) -> Atom;

    /// The polarity of the literal.
    fn polarity(&self) -> bool;
}

impl Literal for CLiteral {
    fn new(atom: Atom, polarity: bool) -> Self {
        match polarity {
            true => atom as CLiteral,
            false => -(atom as CLiteral),
        }
    }

    fn negate(&self) -> Self {
        -self
    }

    fn atom(&self) -> Atom {
        self.unsigned_abs()
    }

    fn polarity(&self) -> bool {
        self.is_positive()
    }
}
