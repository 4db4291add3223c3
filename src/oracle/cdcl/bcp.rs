//! Boolean constraint propagation over two watched literals.
//!
//! Each clause watches its first two literals.
//! On a literal becoming false, each clause watching the literal is examined, and either:
//! - The other watch is true, and nothing is to be done.
//! - Some unwatched literal is not false, and becomes a watch in place of the false literal.
//! - Otherwise, the other watch is forced, or conflicts with the current valuation.
//!
//! The forced literal of a clause is always placed first, which analysis relies on when reading reasons.

use super::{value_of, CdclOracle};

impl CdclOracle {
    /// Propagates each literal on the trail from the queue head, returning the key of a conflicting clause, if found.
    pub(super) fn bcp(&mut self) -> Option<usize> {
        while self.q_head < self.trail.len() {
            let false_literal = self.trail[self.q_head].negate();
            self.q_head += 1;

            let mut watchers = std::mem::take(&mut self.watches[false_literal.index()]);
            let mut kept = 0;
            let mut index = 0;
            let mut conflict = None;

            while index < watchers.len() {
                let key = watchers[index];
                index += 1;

                let clause = &mut self.clauses[key];
                if clause[0] == false_literal {
                    clause.swap(0, 1);
                }
                let first = clause[0];

                if value_of(&self.values, first) == Some(true) {
                    watchers[kept] = key;
                    kept += 1;
                    continue;
                }

                let replacement =
                    (2..clause.len()).find(|position| value_of(&self.values, clause[*position]) != Some(false));

                match replacement {
                    Some(position) => {
                        clause.swap(1, position);
                        let watch = clause[1];
                        self.watches[watch.index()].push(key);
                    }

                    None => {
                        watchers[kept] = key;
                        kept += 1;

                        match value_of(&self.values, first) {
                            Some(false) => {
                                conflict = Some(key);
                                while index < watchers.len() {
                                    watchers[kept] = watchers[index];
                                    kept += 1;
                                    index += 1;
                                }
                            }

                            _ => {
                                self.enqueue(first, Some(key));
                            }
                        }
                    }
                }
            }

            watchers.truncate(kept);
            self.watches[false_literal.index()] = watchers;

            if conflict.is_some() {
                return conflict;
            }
        }

        None
    }
}
