// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Duration-based chunks partitioning strategy.
//!
//! Cuts the work units, in run order, into consecutive chunks of roughly
//! equal duration:
//!
//! ```text
//! target = total_duration / splits
//! ```
//!
//! Units are walked in order. Before a unit is placed, the current bucket
//! is closed if it has already reached `target` (and it is not the last
//! bucket). The last bucket takes whatever remains, however far over
//! `target` that puts it.
//!
//! Concatenating the buckets in order reproduces the input exactly.
//!
//! # Trade-offs
//! - **Keeps neighbours together**: adjacent tests (and their fixtures)
//!   run on the same worker.
//! - **Worse balance** than [`crate::strategy::least_duration`]: the cut is
//!   decided before a unit is placed, so a long unit arriving just under
//!   `target` overloads its bucket.

use crate::plan::BucketSet;
use crate::{InputTestGroup, OutputTestGroup, SplitCount};

/// Splits `groups` into `splits` contiguous runs of similar duration.
pub fn partition<'a>(splits: SplitCount, groups: &[InputTestGroup<'a>]) -> Vec<OutputTestGroup<'a>> {
    let total: f64 = groups.iter().map(|g| g.duration).sum();
    let target = total / splits.get() as f64;
    let last = splits.get() - 1;

    let mut buckets = BucketSet::new(splits);
    let mut current = 0;

    for (index, group) in groups.iter().enumerate() {
        if current < last && buckets.load(current) >= target {
            current += 1;
        }
        buckets.assign(current, index, group);
    }

    buckets.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use suite_model::WorkItem;

    fn items(n: usize) -> Vec<WorkItem> {
        (0..n).map(|i| WorkItem::new(format!("t.py::t{i}"))).collect()
    }

    fn groups<'a>(items: &'a [WorkItem], durations: &[f64]) -> Vec<InputTestGroup<'a>> {
        items
            .iter()
            .zip(durations)
            .map(|(item, &d)| InputTestGroup::new(vec![item], d))
            .collect()
    }

    fn sizes(out: &[OutputTestGroup<'_>]) -> Vec<usize> {
        out.iter().map(|g| g.num_selected()).collect()
    }

    fn n(splits: usize) -> SplitCount {
        SplitCount::new(splits).unwrap()
    }

    #[test]
    fn test_even_chunks() {
        let items = items(6);
        let out = partition(n(3), &groups(&items, &[1.0; 6]));
        assert_eq!(sizes(&out), vec![2, 2, 2]);
        let first: Vec<_> = out[0].selected_ids().collect();
        assert_eq!(first, ["t.py::t0", "t.py::t1"]);
        assert!(out.iter().all(|g| g.duration == 2.0));
    }

    #[test]
    fn test_trailing_heavy_item_overloads_first_bucket() {
        // target = 4; bucket 0 holds 3 when t3 arrives, so it takes t3 too.
        let items = items(4);
        let out = partition(n(2), &groups(&items, &[1.0, 1.0, 1.0, 5.0]));
        assert_eq!(sizes(&out), vec![4, 0]);
        assert_eq!(out[0].duration, 8.0);
        assert_eq!(out[1].duration, 0.0);
        assert_eq!(out[1].deselected.len(), 4);
    }

    #[test]
    fn test_leading_heavy_item() {
        // target = 4; t0 alone reaches it, the rest go to bucket 1.
        let items = items(4);
        let out = partition(n(2), &groups(&items, &[5.0, 1.0, 1.0, 1.0]));
        assert_eq!(sizes(&out), vec![1, 3]);
        assert_eq!(out[1].duration, 3.0);
    }

    #[test]
    fn test_last_bucket_absorbs_remainder() {
        let items = items(5);
        let out = partition(n(2), &groups(&items, &[3.0, 1.0, 1.0, 1.0, 1.0]));
        // target = 3.5: bucket 0 = t0,t1 (4), bucket 1 = rest.
        assert_eq!(sizes(&out), vec![2, 3]);
        assert_eq!(out[0].duration, 4.0);
        assert_eq!(out[1].duration, 3.0);
    }

    #[test]
    fn test_concatenation_reproduces_input() {
        let items = items(7);
        let out = partition(n(3), &groups(&items, &[2.0, 0.5, 3.0, 1.0, 1.0, 4.0, 0.5]));
        let all: Vec<_> = out.iter().flat_map(|g| g.selected_ids()).collect();
        let expected: Vec<_> = items.iter().map(|i| i.id()).collect();
        assert_eq!(all, expected);
    }

    #[test]
    fn test_more_buckets_than_groups() {
        let items = items(2);
        let out = partition(n(4), &groups(&items, &[1.0, 1.0]));
        // target = 0.5: each unit closes its bucket.
        assert_eq!(sizes(&out), vec![1, 1, 0, 0]);
    }

    #[test]
    fn test_zero_durations_fill_from_second_bucket() {
        // target = 0, so bucket 0 counts as full before anything is placed.
        let items = items(3);
        let out = partition(n(3), &groups(&items, &[0.0, 0.0, 0.0]));
        assert_eq!(sizes(&out), vec![0, 1, 2]);
    }

    #[test]
    fn test_no_groups() {
        let out = partition(n(2), &[]);
        assert_eq!(sizes(&out), vec![0, 0]);
        assert!(out.iter().all(|g| g.duration == 0.0));
    }
}
