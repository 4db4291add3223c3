/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library.
These are intended to provide useful information for tuning a search and/or fixing issues.

Note, no log implementation is provided.
The cli installs [env_logger](https://docs.rs/env_logger) when built with the `log` feature, and the usual `RUST_LOG` filters apply to the targets below.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to [closure](crate::procedures::closure)
    pub const PROPAGATION: &str = "propagation";

    /// Logs related to [lookahead](crate::procedures::lookahead)
    pub const LOOKAHEAD: &str = "lookahead";

    /// Logs related to [merging](crate::procedures::merge)
    pub const MERGE: &str = "merge";

    /// Logs related to [branching](crate::procedures::branch)
    pub const BRANCH: &str = "branch";

    /// Logs related to the marking and removal of streams
    pub const DELETION: &str = "deletion";

    /// Logs related to the [variable ordering](crate::procedures::ordering)
    pub const ORDERING: &str = "ordering";

    /// Logs related to [verifier threads](crate::procedures::verifier)
    pub const VERIFIER: &str = "verifier";

    /// Logs related to the [exact oracle](crate::oracle)
    pub const ORACLE: &str = "oracle";

    /// Logs related to [checkpoints](crate::checkpoint)
    pub const CHECKPOINT: &str = "checkpoint";

    /// Logs related to the [stream pool](crate::pool), e.g. exhaustion
    pub const POOL: &str = "pool";
}
