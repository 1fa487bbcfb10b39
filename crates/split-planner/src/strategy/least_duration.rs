// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Least-duration partitioning strategy.
//!
//! Greedy longest-first bin packing: work units are visited from the
//! longest to the shortest, and each one goes to the bucket with the
//! smallest accumulated duration.
//!
//! # Determinism
//!
//! ```text
//! visit order  : (duration desc, original index asc)
//! bucket order : (accumulated duration asc, bucket index asc)
//! ```
//!
//! Both keys are total, so two workers given the same input always make
//! the same choices. After assignment each bucket is put back into run
//! order.
//!
//! # Complexity
//! O(G log G) for the sort plus O(G log N) heap work, for G work units and
//! N buckets.
//!
//! # When to use
//! - Best balance between buckets.
//! - Run order across buckets does not matter.

use crate::plan::BucketSet;
use crate::{InputTestGroup, OutputTestGroup, SplitCount};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A bucket's position in the min-heap.
#[derive(Debug, Clone, Copy)]
struct Bucket {
    load: f64,
    index: usize,
}

impl Ord for Bucket {
    fn cmp(&self, other: &Self) -> Ordering {
        self.load
            .total_cmp(&other.load)
            .then_with(|| self.index.cmp(&other.index))
    }
}

impl PartialOrd for Bucket {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Bucket {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Bucket {}

/// Splits `groups` into `splits` buckets, longest work unit first.
pub fn partition<'a>(splits: SplitCount, groups: &[InputTestGroup<'a>]) -> Vec<OutputTestGroup<'a>> {
    let mut order: Vec<(usize, &InputTestGroup<'a>)> = groups.iter().enumerate().collect();
    order.sort_unstable_by(|(ia, a), (ib, b)| {
        b.duration
            .total_cmp(&a.duration)
            .then_with(|| ia.cmp(ib))
    });

    let mut heap: BinaryHeap<Reverse<Bucket>> = (0..splits.get())
        .map(|index| Reverse(Bucket { load: 0.0, index }))
        .collect();
    let mut buckets = BucketSet::new(splits);

    for (original_index, group) in order {
        // The heap always holds all `splits` buckets, so it is never empty.
        if let Some(mut lightest) = heap.peek_mut() {
            let Reverse(bucket) = &mut *lightest;
            buckets.assign(bucket.index, original_index, group);
            bucket.load += group.duration;
        }
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

    fn selected(out: &OutputTestGroup<'_>) -> Vec<String> {
        out.selected_ids().map(str::to_string).collect()
    }

    fn n(splits: usize) -> SplitCount {
        SplitCount::new(splits).unwrap()
    }

    #[test]
    fn test_heaviest_alone() {
        let items = items(4);
        let out = partition(n(2), &groups(&items, &[5.0, 1.0, 1.0, 1.0]));

        assert_eq!(selected(&out[0]), ["t.py::t0"]);
        assert_eq!(out[0].duration, 5.0);
        assert_eq!(selected(&out[1]), ["t.py::t1", "t.py::t2", "t.py::t3"]);
        assert_eq!(out[1].duration, 3.0);
    }

    #[test]
    fn test_selected_restored_to_run_order() {
        let items = items(5);
        // Visit order: t4(5) t0(4) t2(3) t1(2) t3(1)
        // t4 → b0, t0 → b1, t2 → b1 (4 < 5), t1 → b0 (5 < 7), t3 → b0 (7 = 7, lower index)
        let out = partition(n(2), &groups(&items, &[4.0, 2.0, 3.0, 1.0, 5.0]));

        assert_eq!(selected(&out[0]), ["t.py::t1", "t.py::t3", "t.py::t4"]);
        assert_eq!(selected(&out[1]), ["t.py::t0", "t.py::t2"]);
        assert_eq!(out[0].duration, 8.0);
        assert_eq!(out[1].duration, 7.0);
    }

    #[test]
    fn test_equal_durations_round_robin() {
        let items = items(6);
        let out = partition(n(3), &groups(&items, &[1.0; 6]));

        assert_eq!(selected(&out[0]), ["t.py::t0", "t.py::t3"]);
        assert_eq!(selected(&out[1]), ["t.py::t1", "t.py::t4"]);
        assert_eq!(selected(&out[2]), ["t.py::t2", "t.py::t5"]);
    }

    #[test]
    fn test_more_buckets_than_groups() {
        let items = items(2);
        let out = partition(n(4), &groups(&items, &[2.0, 3.0]));

        assert_eq!(out.len(), 4);
        assert_eq!(selected(&out[0]), ["t.py::t1"]);
        assert_eq!(selected(&out[1]), ["t.py::t0"]);
        assert!(out[2].is_empty());
        assert!(out[3].is_empty());
        assert_eq!(out[3].duration, 0.0);
        assert_eq!(out[3].deselected.len(), 2);
    }

    #[test]
    fn test_no_groups() {
        let out = partition(n(3), &[]);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|g| g.is_empty() && g.deselected.is_empty() && g.duration == 0.0));
    }

    #[test]
    fn test_single_bucket_takes_everything() {
        let items = items(3);
        let out = partition(n(1), &groups(&items, &[1.0, 3.0, 2.0]));
        assert_eq!(selected(&out[0]), ["t.py::t0", "t.py::t1", "t.py::t2"]);
        assert!(out[0].deselected.is_empty());
        assert_eq!(out[0].duration, 6.0);
    }

    #[test]
    fn test_multi_item_groups_flatten_in_order() {
        let items = items(4);
        let input = vec![
            InputTestGroup::new(vec![&items[0], &items[1]], 1.0),
            InputTestGroup::new(vec![&items[2], &items[3]], 10.0),
        ];
        let out = partition(n(2), &input);
        assert_eq!(selected(&out[0]), ["t.py::t2", "t.py::t3"]);
        assert_eq!(selected(&out[1]), ["t.py::t0", "t.py::t1"]);
        let deselected: Vec<_> = out[0].deselected.iter().map(|i| i.id()).collect();
        assert_eq!(deselected, ["t.py::t0", "t.py::t1"]);
    }

    #[test]
    fn test_bucket_ordering() {
        let a = Bucket { load: 1.0, index: 1 };
        let b = Bucket { load: 1.0, index: 0 };
        let c = Bucket { load: 0.5, index: 2 };
        assert!(b < a);
        assert!(c < b);
        assert_eq!(a, Bucket { load: 1.0, index: 1 });
    }
}
