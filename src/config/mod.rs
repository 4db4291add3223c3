/*!
Configuration of a context.

All configuration of a search is contained within a [Config], and each context holds a config.
Verifier threads clone the parts of the configuration they require when spawned.

Each tunable value is a [ConfigOption], noting the bounds the value is required to be within.
Values may be written directly, though [set](ConfigOption::set) checks the bounds.

```rust
# use stream_sat::config::Config;
let mut config = Config::default();
assert!(config.window_size.set(8).is_ok());
assert!(config.branching_chance.set(1.5).is_err());
assert_eq!(config.window_size.value, 8);
```
*/

use std::{path::PathBuf, time::Duration};

use crate::procedures::lookahead::MAX_WINDOW;

mod config_option;
pub use config_option::ConfigOption;

/// Representation for probabilities and proportions.
pub type Proportion = f64;

/// A duration longer than any search is expected to run.
const A_WEEK: Duration = Duration::from_secs(60 * 60 * 24 * 7);

/// A duration longer than any single oracle call is expected to run.
const A_DAY: Duration = Duration::from_secs(60 * 60 * 24);

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// The proportion of the distance from the average stream size to the maximum stream size at which streams become candidates for merging.
    pub merging_threshold: ConfigOption<Proportion>,

    /// The probability of splitting the smallest stream after each stream step.
    pub branching_chance: ConfigOption<Proportion>,

    /// The count of atoms in each lookahead window.
    /// Each window is closed under every one of its 2^k valuations.
    pub window_size: ConfigOption<usize>,

    /// The count of verifier threads with a short time limit.
    pub fast_verifiers: ConfigOption<usize>,

    /// The count of verifier threads with a long time limit.
    pub slow_verifiers: ConfigOption<usize>,

    /// The time limit of each oracle call made by a fast verifier.
    pub fast_time_limit: ConfigOption<Duration>,

    /// The time limit of each oracle call made by a slow verifier, and by the search on exhaustion of the pool.
    pub slow_time_limit: ConfigOption<Duration>,

    /// The time limit of each oracle call made to check a grown stream.
    pub inline_time_limit: ConfigOption<Duration>,

    /// The minimum time between recomputations of the variable ordering.
    pub ordering_cooldown: ConfigOption<Duration>,

    /// Write checkpoints during a search, and resume from a checkpoint when starting a search.
    pub checkpoints: ConfigOption<bool>,

    /// The directory within which checkpoints for each formula are kept.
    pub checkpoint_directory: PathBuf,

    /// The minimum time between checkpoints.
    pub checkpoint_interval: ConfigOption<Duration>,

    /// The seed of the source of rng of the search.
    /// Each verifier thread is seeded from this source.
    pub seed: ConfigOption<u64>,

    /// The time limit for a search, with zero for no limit.
    pub time_limit: ConfigOption<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            merging_threshold: ConfigOption {
                name: "merging_threshold",
                min: 0.0,
                max: 1.0,
                value: 0.02,
            },

            branching_chance: ConfigOption {
                name: "branching_chance",
                min: 0.0,
                max: 1.0,
                value: 0.1,
            },

            window_size: ConfigOption {
                name: "window_size",
                min: 1,
                max: MAX_WINDOW,
                value: 6,
            },

            fast_verifiers: ConfigOption {
                name: "fast_verifiers",
                min: 0,
                max: 256,
                value: 4,
            },

            slow_verifiers: ConfigOption {
                name: "slow_verifiers",
                min: 0,
                max: 256,
                value: 1,
            },

            fast_time_limit: ConfigOption {
                name: "fast_time_limit",
                min: Duration::from_millis(1),
                max: A_DAY,
                value: Duration::from_secs(10),
            },

            slow_time_limit: ConfigOption {
                name: "slow_time_limit",
                min: Duration::from_millis(1),
                max: A_DAY,
                value: Duration::from_secs(60),
            },

            inline_time_limit: ConfigOption {
                name: "inline_time_limit",
                min: Duration::from_millis(1),
                max: A_DAY,
                value: Duration::from_millis(500),
            },

            ordering_cooldown: ConfigOption {
                name: "ordering_cooldown",
                min: Duration::from_secs(0),
                max: A_DAY,
                value: Duration::from_secs(60),
            },

            checkpoints: ConfigOption {
                name: "checkpoints",
                min: false,
                max: true,
                value: false,
            },

            checkpoint_directory: PathBuf::from("checkpoints"),

            checkpoint_interval: ConfigOption {
                name: "checkpoint_interval",
                min: Duration::from_secs(0),
                max: A_WEEK,
                value: Duration::from_secs(30 * 60),
            },

            seed: ConfigOption {
                name: "seed",
                min: u64::MIN,
                max: u64::MAX,
                value: 42,
            },

            time_limit: ConfigOption {
                name: "time_limit",
                min: Duration::from_secs(0),
                max: Duration::MAX,
                value: Duration::from_secs(0),
            },
        }
    }
}

impl Config {
    /// The time limit of a search, if some limit is set.
    pub fn search_limit(&self) -> Option<Duration> {
        match self.time_limit.value.is_zero() {
            true => None,
            false => Some(self.time_limit.value),
        }
    }
}
