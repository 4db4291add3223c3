/*!
Completion of a search, claimed at most once.

The orchestrator and each verifier thread race to complete a search.
Whichever [claims](Completion::claim) first fixes the outcome, and every later claim is refused.
Threads which lose the race observe [is_complete](Completion::is_complete) and stop without writing.

```rust
# use stream_sat::context::completion::{Claimant, Completion, Outcome};
# use stream_sat::structures::assignment::Assignment;
let completion = Completion::default();
assert!(!completion.is_complete());

assert!(completion.claim(Outcome::Satisfiable(Assignment::from_literals([1])), Claimant::Verifier(2)));
assert!(!completion.claim(Outcome::Unsatisfiable, Claimant::Orchestrator));

let claim = completion.get().expect("a claim");
assert_eq!(claim.claimant, Claimant::Verifier(2));
```
*/

use std::sync::OnceLock;

use crate::{reports::Report, structures::assignment::Assignment};

/// The outcome of a completed search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A model of the formula.
    Satisfiable(Assignment),

    /// The formula has no model.
    Unsatisfiable,
}

/// Who completed the search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Claimant {
    /// The orchestrator, on a complete stream or on a global assignment covering every atom.
    Orchestrator,

    /// The verifier thread with the given index.
    Verifier(usize),

    /// The orchestrator, from a call to the oracle on exhaustion of the pool, or before any search took place.
    Exhaustion,
}

/// A successful claim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Claim {
    pub outcome: Outcome,
    pub claimant: Claimant,
}

/// Completion of a search, shared between the orchestrator and each verifier thread.
#[derive(Debug, Default)]
pub struct Completion {
    claim: OnceLock<Claim>,
}

impl Completion {
    /// Claims completion with `outcome`, returning true if the claim was the first.
    pub fn claim(&self, outcome: Outcome, claimant: Claimant) -> bool {
        self.claim.set(Claim { outcome, claimant }).is_ok()
    }

    pub fn is_complete(&self) -> bool {
        self.claim.get().is_some()
    }

    /// The claim which completed the search, if any.
    pub fn get(&self) -> Option<&Claim> {
        self.claim.get()
    }

    /// A report of the outcome of the search.
    pub fn report(&self) -> Report {
        match self.claim.get() {
            None => Report::Unknown,
            Some(Claim {
                outcome: Outcome::Satisfiable(_),
                ..
            }) => Report::Satisfiable,
            Some(Claim {
                outcome: Outcome::Unsatisfiable,
                ..
            }) => Report::Unsatisfiable,
        }
    }

    /// The model of a satisfiable outcome, if any.
    pub fn model(&self) -> Option<&Assignment> {
        match self.claim.get() {
            Some(Claim {
                outcome: Outcome::Satisfiable(model),
                ..
            }) => Some(model),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn first_of_many_threads_wins() {
        let completion = Arc::new(Completion::default());

        let handles = (0..8)
            .map(|index| {
                let completion = completion.clone();
                std::thread::spawn(move || {
                    completion.claim(Outcome::Unsatisfiable, Claimant::Verifier(index))
                })
            })
            .collect::<Vec<_>>();

        let wins = handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or(false))
            .filter(|won| *won)
            .count();

        assert_eq!(wins, 1);
        assert_eq!(completion.report(), Report::Unsatisfiable);
        assert!(completion.model().is_none());
    }
}
