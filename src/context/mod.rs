/*!
The context --- within which a formula is held, and a search takes place.

Strictly, a [GenericContext] and a [Context].

The generic context is generic over the [exact oracle](crate::oracle) used to verify streams, and a [Context] uses the [CdclOracle] of the library.

A context holds:
- The formula, and the [clause database](crate::db::clause) built from the formula.
- The *root* assignment, the closure of the unit clauses of the formula.
  Every stream of the search extends the root assignment.
- The [pool](crate::pool) of streams, shared with verifier threads during a solve.
- The global assignment `init`, the literals common to every stream of the pool.
- The [completion](completion) of the search, shared with verifier threads during a solve.

# Example
```rust
# use stream_sat::context::Context;
# use stream_sat::config::Config;
# use stream_sat::reports::Report;
# use stream_sat::structures::formula::Formula;
let formula = Formula::from_clauses(vec![vec![1], vec![-1, 2], vec![-2, -3]]);
let the_context = Context::from_formula(Config::default(), formula, None);

// The root assignment is the closure of the unit clauses.
assert!(the_context.root.contains(2));
assert!(the_context.root.contains(-3));
assert_eq!(the_context.report(), Report::Unknown);
```
*/

pub mod completion;
mod counters;
pub use counters::Counters;
mod generic;
pub use generic::GenericContext;

use crate::oracle::cdcl::CdclOracle;

/// A context which uses [CdclOracle] as the exact oracle.
pub type Context = GenericContext<CdclOracle>;
