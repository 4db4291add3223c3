/*!
(The representation of) an atom (aka. a 'variable').

Atoms are positive integers, as found in a DIMACS file.
An atom is *of* a formula if some literal of the formula has the atom, and the count of atoms of a formula is the count of distinct such atoms.
Atoms of a formula need not be contiguous.

```rust
# use stream_sat::structures::atom::Atom;
let atoms = (1..=97).collect::<Vec<Atom>>();
assert_eq!(atoms.len(), 97);
```
*/

/// An atom, aka. a 'variable'.
pub type Atom = u32;
