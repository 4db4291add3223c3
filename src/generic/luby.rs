/*!
An iterator to generate the luby sequence.

See <https://oeis.org/A182105> for details on the luby sequence.

Each element is computed directly from its position, following the formulation used by MiniSAT: find the smallest complete binary tree containing the position, and descend into the subtree containing the position until the position is the last of its tree.

The sequence is used to schedule restarts of the [exact oracle](crate::oracle::cdcl).
*/

/// Representation used for numbers in a luby sequence.
pub type LubyRepresentation = u32;

/// Foundation of the iterator, the position of the next element.
#[derive(Default)]
pub struct Luby {
    position: u64,
}

impl Iterator for Luby {
    type Item = LubyRepresentation;

    fn next(&mut self) -> Option<Self::Item> {
        let element = luby_at(self.position)?;
        self.position += 1;
        Some(element)
    }
}

/// The element of the luby sequence at (zero-indexed) `position`, if representable.
pub fn luby_at(mut position: u64) -> Option<LubyRepresentation> {
    let mut size: u64 = 1;
    let mut exponent: u32 = 0;

    while size < position + 1 {
        exponent += 1;
        size = size.checked_mul(2)?.checked_add(1)?;
    }

    while size - 1 != position {
        size = (size - 1) >> 1;
        exponent -= 1;
        position %= size;
    }

    (1 as LubyRepresentation).checked_shl(exponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    // https://oeis.org/A182105
    const LUBY_SLICE: &[LubyRepresentation] = &[
        1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8,
        16, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4,
        8, 16, 32, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1,
        2, 4, 8, 16, 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, 1, 1, 2, 4, 8,
    ];

    #[test]
    fn luby() {
        let mut l = Luby::default();
        for known_value in LUBY_SLICE {
            assert_eq!(l.next(), Some(*known_value))
        }
    }

    #[test]
    fn tree_ends() {
        // The last element of a tree of 2^(n+1) - 1 elements is 2^n.
        assert_eq!(luby_at(0), Some(1));
        assert_eq!(luby_at(6), Some(4));
        assert_eq!(luby_at(62), Some(32));
        assert_eq!(luby_at((1 << 20) - 2), Some(1 << 19));
        assert_eq!(luby_at((1 << 40) - 2), None);
    }
}
