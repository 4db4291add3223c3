/*!
Dispatches for external observers.

Dispatches have two uses:
- Communication after some procedure, e.g. a solve or a checkpoint.
- Optional observation of the dynamics of the stream pool during a search.

Each dispatch is a small message of some pre-determined type, and is sent through a [Dispatcher] given to a context on construction.
The dispatcher is shared with each verifier thread, and so is required to be [Send] and [Sync].
If no dispatcher is given, no dispatch is built.

- [library] contains all dispatch types, arranged in a fixed heirarchy.

Dispatches come in a variety of types;

- [Deltas](crate::dispatch::library::delta), on some change to the pool or to the global assignment.
  - For example:
    - Addition of streams, by branching or merging.
    - Marking and removal of streams.
- [Reports](crate::dispatch::library::report), on the result of some procedure.
  - For example, whether a formula is satisfiable, or whether a checkpoint was written.
- [Stats](crate::dispatch::library::stat), regarding various things.
  - For example, the progress of the search, or a count of deletions per minute.

Dispatches are designed to be tidy to deconstruct by pattern matching, though as a consequence are somewhat messy to construct.
So, dispatches are typically broken up into parts, relative to the module of the type of dispatch.

```rust
# use std::sync::{Arc, Mutex};
# use stream_sat::dispatch::{Dispatch, Dispatcher, library::delta::{self, Delta}};
let seen = Arc::new(Mutex::new(Vec::default()));
let seen_clone = seen.clone();
let dispatcher: Dispatcher = Arc::new(move |dispatch: Dispatch| {
    seen_clone.lock().unwrap().push(dispatch);
});

let delta = delta::Pool::Seeded(0);
dispatcher(Dispatch::Delta(Delta::Pool(delta)));

assert_eq!(seen.lock().unwrap().len(), 1);
```

# Receivers

The cli forwards each dispatch to a channel, with a separate thread receiving dispatches and writing progress to the console.
Other receivers may wish to record dispatches to a file, or to count them.
*/

pub mod library;

use std::sync::Arc;

use library::{delta::Delta, report::Report, stat::Stat};

/// A dispatch.
#[derive(Clone, Debug)]
pub enum Dispatch {
    /// Some change to the pool or global assignment.
    Delta(Delta),

    /// The result of some procedure.
    Report(Report),

    /// Statistics regarding the search.
    Stat(Stat),
}

/// A function which receives dispatches.
pub type Dispatcher = Arc<dyn Fn(Dispatch) + Send + Sync>;

/// Sends the dispatch built by `make` through `dispatcher`, if some dispatcher is present.
///
/// The dispatch is only built if sent.
pub fn send(dispatcher: &Option<Dispatcher>, make: impl FnOnce() -> Dispatch) {
    if let Some(dispatcher) = dispatcher {
        dispatcher(make())
    }
}
