/*!
Merging of streams which agree on much.

# Overview

A merge pass considers the unmarked streams of the pool.

A size threshold is given by scaling the [merging threshold](crate::config::Config::merging_threshold) between the average and the maximum size of a stream:

```none
threshold = average + merging_threshold * (maximum - average)
```

Streams larger than the threshold are candidates, and each pair of candidates is considered at most once.
If the intersection of the pair is also larger than the threshold, the pair is removed from the pool and replaced by a fresh stream holding the intersection.
A stream consumed by a merge is not paired again during the same pass.

As the global assignment is contained in every stream, the intersection of the pair contains the global assignment, and the intersection of the pool is unchanged by a merge.
*/

use crate::{
    config::Proportion,
    context::GenericContext,
    dispatch::{
        library::delta::{self, Delta},
        Dispatch,
    },
    misc::log::targets::{self},
    oracle::Oracle,
};

/// The size a stream must exceed to be a candidate for merging, or None if there are no sizes.
pub fn merge_threshold(sizes: &[usize], proportion: Proportion) -> Option<f64> {
    let maximum = *sizes.iter().max()? as f64;
    let average = sizes.iter().sum::<usize>() as f64 / sizes.len() as f64;
    Some(average + proportion * (maximum - average))
}

impl<O: Oracle> GenericContext<O> {
    /// Merges pairs of large streams which agree on much, returning a count of merges.
    ///
    /// For details, see [procedures::merge](crate::procedures::merge).
    pub fn merge_pass(&mut self) -> usize {
        let streams = self.pool.unmarked();
        if streams.len() < 2 {
            return 0;
        }

        let sizes = streams.iter().map(|stream| stream.len()).collect::<Vec<_>>();
        let Some(threshold) = merge_threshold(&sizes, self.config.merging_threshold.value) else {
            return 0;
        };

        let candidates = streams
            .into_iter()
            .zip(sizes)
            .filter(|(_, size)| *size as f64 > threshold)
            .map(|(stream, _)| (stream.snapshot(), stream))
            .collect::<Vec<_>>();

        let mut consumed = vec![false; candidates.len()];
        let mut merges = 0;

        for i in 0..candidates.len() {
            for j in (i + 1)..candidates.len() {
                if consumed[i] {
                    break;
                }
                if consumed[j] {
                    continue;
                }

                let common = candidates[i].0.intersection(&candidates[j].0);
                if common.len() as f64 <= threshold {
                    continue;
                }

                let (a, b) = (candidates[i].1.id(), candidates[j].1.id());
                self.pool.remove(&[a, b]);
                self.momentum.remove(&a);
                self.momentum.remove(&b);

                let size = common.len();
                let merged = self.pool.add(common);
                let into = merged.id();

                consumed[i] = true;
                consumed[j] = true;
                merges += 1;
                self.counters.merges += 1;

                log::trace!(target: targets::MERGE, "Streams {a} and {b} merged into {into} of size {size}");
                self.dispatch(|| {
                    Dispatch::Delta(Delta::Pool(delta::Pool::Merged {
                        from: (a, b),
                        into,
                        size,
                    }))
                });
            }
        }

        merges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_scales_between_average_and_maximum() {
        assert_eq!(merge_threshold(&[], 0.5), None);
        assert_eq!(merge_threshold(&[2, 4, 6], 0.0), Some(4.0));
        assert_eq!(merge_threshold(&[2, 4, 6], 1.0), Some(6.0));
        assert_eq!(merge_threshold(&[2, 4, 6], 0.5), Some(5.0));
    }
}
