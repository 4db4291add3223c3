/*!
Statistics regarding a search.

Progress is dispatched after each pass of the orchestrator.

Rates, such as deletions per minute or atoms settled per minute, are kept in a [RateTable].
The table is a fixed list of metrics, each with a function to read the current count from the [counters](Counters) of a context, an interval, and the last sample taken.
A sweep of the table samples each metric whose interval has passed, and returns the rate since the last sample.

```rust
# use std::time::{Duration, Instant};
# use stream_sat::context::Counters;
# use stream_sat::dispatch::library::stat::RateTable;
let mut table = RateTable::standard(Duration::from_secs(60));
let mut counters = Counters::default();

let start = Instant::now();
assert!(table.sweep(&counters, start).is_empty()); // First samples.

counters.deletions = 30;
let rates = table.sweep(&counters, start + Duration::from_secs(60));
assert!(rates.contains(&("deletions", 30.0)));
```
*/

use std::time::{Duration, Instant};

use crate::context::Counters;

/// Statistics regarding the search.
#[derive(Clone, Debug, PartialEq)]
pub enum Stat {
    /// The progress of the search.
    Progress {
        /// The size of the global assignment.
        solved: usize,

        /// The size of the smallest stream.
        smallest: usize,

        /// The count of atoms of the formula.
        total: usize,

        /// The count of streams in the pool.
        streams: usize,

        /// `solved / total + (smallest / total) / 2`.
        progress: f64,
    },

    /// The rate of some metric, per minute.
    Rate { name: &'static str, per_minute: f64 },
}

/// A metric of the rate table.
pub struct RateEntry {
    pub name: &'static str,

    /// Reads the current count of the metric.
    accessor: fn(&Counters) -> usize,

    interval: Duration,

    /// The time and count of the last sample.
    last_sample: Option<(Instant, usize)>,
}

impl RateEntry {
    pub fn new(name: &'static str, accessor: fn(&Counters) -> usize, interval: Duration) -> Self {
        RateEntry {
            name,
            accessor,
            interval,
            last_sample: None,
        }
    }
}

/// A table of metrics, sampled at fixed intervals.
pub struct RateTable {
    entries: Vec<RateEntry>,
}

impl RateTable {
    /// A table of the standard metrics, each with the given interval.
    pub fn standard(interval: Duration) -> Self {
        RateTable {
            entries: vec![
                RateEntry::new("deletions", |counters| counters.deletions, interval),
                RateEntry::new("additions", |counters| counters.additions, interval),
                RateEntry::new("solved", |counters| counters.solved, interval),
                RateEntry::new("merges", |counters| counters.merges, interval),
                RateEntry::new("propagations", |counters| counters.propagations, interval),
                RateEntry::new("broadcasts", |counters| counters.broadcasts, interval),
            ],
        }
    }

    /// Samples each metric whose interval has passed at `now`, returning the rate per minute since the previous sample of each.
    ///
    /// The first sample of a metric has no rate.
    pub fn sweep(&mut self, counters: &Counters, now: Instant) -> Vec<(&'static str, f64)> {
        let mut rates = Vec::default();

        for entry in &mut self.entries {
            let count = (entry.accessor)(counters);
            match entry.last_sample {
                None => entry.last_sample = Some((now, count)),

                Some((then, previous)) => {
                    let elapsed = now.saturating_duration_since(then);
                    if elapsed < entry.interval || elapsed.is_zero() {
                        continue;
                    }
                    let minutes = elapsed.as_secs_f64() / 60.0;
                    rates.push((entry.name, count.saturating_sub(previous) as f64 / minutes));
                    entry.last_sample = Some((now, count));
                }
            }
        }

        rates
    }
}
