// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Split plan: the input and output shapes of every partition strategy.
//!
//! Strategies consume an ordered slice of [`InputTestGroup`]s (weighted
//! work units) and produce one [`OutputTestGroup`] per bucket. A
//! [`SplitPlan`] wraps those outputs together with the parameters that
//! produced them, and is the contract between the planner and whoever
//! decides which tests a worker runs.

use crate::{Algorithm, GroupingMode, PlannerError};
use std::collections::HashSet;
use std::fmt;
use std::num::NonZeroUsize;
use suite_model::WorkItem;

/// Relative tolerance used when checking that durations are conserved.
const DURATION_TOLERANCE: f64 = 1e-9;

// ── SplitCount ─────────────────────────────────────────────────────

/// Number of groups to split into. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct SplitCount(NonZeroUsize);

impl SplitCount {
    /// Validates a raw split count.
    pub fn new(splits: usize) -> Result<Self, PlannerError> {
        NonZeroUsize::new(splits)
            .map(Self)
            .ok_or(PlannerError::InvalidSplitCount { splits })
    }

    /// Returns the number of groups.
    pub fn get(self) -> usize {
        self.0.get()
    }

    /// Checks that `group` is a valid 0-based group index.
    pub fn check_group(self, group: usize) -> Result<usize, PlannerError> {
        if group < self.get() {
            Ok(group)
        } else {
            Err(PlannerError::GroupOutOfRange {
                group,
                splits: self.get(),
            })
        }
    }
}

impl fmt::Display for SplitCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Input / output groups ──────────────────────────────────────────

/// A weighted unit of work: one or more tests that are always assigned
/// to the same bucket.
///
/// `duration` is the sum of the estimated durations of `tests`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct InputTestGroup<'a> {
    /// Member tests in run order.
    pub tests: Vec<&'a WorkItem>,
    /// Combined estimated duration in seconds.
    pub duration: f64,
}

impl<'a> InputTestGroup<'a> {
    /// Creates a group from its members and combined duration.
    pub fn new(tests: Vec<&'a WorkItem>, duration: f64) -> Self {
        Self { tests, duration }
    }

    /// Returns the number of tests in this group.
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    /// Returns `true` if this group has no tests.
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

/// The result for one bucket of a split.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct OutputTestGroup<'a> {
    /// Tests this bucket runs, in original run order.
    pub selected: Vec<&'a WorkItem>,
    /// Tests assigned to every other bucket. Order is unspecified.
    pub deselected: Vec<&'a WorkItem>,
    /// Sum of the durations of the selected work units.
    pub duration: f64,
}

impl OutputTestGroup<'_> {
    /// Returns the number of selected tests.
    pub fn num_selected(&self) -> usize {
        self.selected.len()
    }

    /// Returns `true` if this bucket runs nothing.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Returns the ids of the selected tests in run order.
    pub fn selected_ids(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(|item| item.id())
    }
}

// ── SplitPlan ──────────────────────────────────────────────────────

/// The complete result of one partition call.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SplitPlan<'a> {
    /// Algorithm that produced this plan.
    pub algorithm: Algorithm,
    /// How tests were grouped into work units.
    pub grouping: GroupingMode,
    /// Number of buckets.
    pub splits: SplitCount,
    /// One output group per bucket, indexed by group number.
    pub groups: Vec<OutputTestGroup<'a>>,
    /// Number of tests in the input.
    pub total_tests: usize,
    /// Sum of all input work-unit durations.
    pub total_duration: f64,
}

impl<'a> SplitPlan<'a> {
    /// Returns the output group for the 0-based `index`.
    pub fn group(&self, index: usize) -> Result<&OutputTestGroup<'a>, PlannerError> {
        let index = self.splits.check_group(index)?;
        self.groups
            .get(index)
            .ok_or(PlannerError::GroupOutOfRange {
                group: index,
                splits: self.groups.len(),
            })
    }

    /// Returns the largest bucket duration.
    pub fn max_group_duration(&self) -> f64 {
        self.groups
            .iter()
            .map(|g| g.duration)
            .fold(0.0, f64::max)
    }

    /// Returns the mean bucket duration.
    pub fn mean_group_duration(&self) -> f64 {
        self.total_duration / self.splits.get() as f64
    }

    /// Validates the plan.
    ///
    /// Checks:
    /// - There is exactly one output group per bucket.
    /// - Every input test is selected by exactly one group.
    /// - Each group's deselected tests are exactly the tests the other
    ///   groups selected.
    /// - Bucket durations add up to the input duration.
    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.groups.len() != self.splits.get() {
            return Err(self.failure(format!(
                "expected {} groups, got {}",
                self.splits,
                self.groups.len(),
            )));
        }

        let mut all_selected: HashSet<&str> = HashSet::with_capacity(self.total_tests);
        for (index, group) in self.groups.iter().enumerate() {
            for id in group.selected_ids() {
                if !all_selected.insert(id) {
                    return Err(self.failure(format!(
                        "test '{id}' selected twice (again in group {index})"
                    )));
                }
            }
        }
        if all_selected.len() != self.total_tests {
            return Err(self.failure(format!(
                "{} of {} tests selected",
                all_selected.len(),
                self.total_tests,
            )));
        }

        for (index, group) in self.groups.iter().enumerate() {
            let selected: HashSet<&str> = group.selected_ids().collect();
            if group.deselected.len() + selected.len() != self.total_tests {
                return Err(self.failure(format!(
                    "group {index} selects {} and deselects {} of {} tests",
                    selected.len(),
                    group.deselected.len(),
                    self.total_tests,
                )));
            }
            for item in &group.deselected {
                if selected.contains(item.id()) || !all_selected.contains(item.id()) {
                    return Err(self.failure(format!(
                        "group {index} deselects '{}' which is not selected elsewhere",
                        item.id(),
                    )));
                }
            }
        }

        let sum: f64 = self.groups.iter().map(|g| g.duration).sum();
        let tolerance = DURATION_TOLERANCE * self.total_duration.abs().max(1.0);
        if (sum - self.total_duration).abs() > tolerance {
            return Err(self.failure(format!(
                "group durations sum to {sum}, input totals {}",
                self.total_duration,
            )));
        }

        Ok(())
    }

    /// Returns a human-readable summary of the plan.
    pub fn summary(&self) -> String {
        let sizes: Vec<usize> = self.groups.iter().map(|g| g.num_selected()).collect();
        format!(
            "Plan '{}' ({}): {} groups, {} tests, {:.2}s total, \
             max {:.2}s / mean {:.2}s per group, group sizes: {:?}",
            self.algorithm,
            self.grouping,
            self.splits,
            self.total_tests,
            self.total_duration,
            self.max_group_duration(),
            self.mean_group_duration(),
            sizes,
        )
    }

    fn failure(&self, detail: String) -> PlannerError {
        PlannerError::StrategyFailed {
            strategy: self.algorithm.name().to_string(),
            detail,
        }
    }
}

// ── BucketSet ──────────────────────────────────────────────────────

/// Accumulates work-unit assignments for every bucket.
///
/// Used internally by strategy implementations. Assignments may arrive in
/// any order; [`BucketSet::build`] restores run order inside each bucket
/// using the original index recorded at assignment time.
pub(crate) struct BucketSet<'g, 'a> {
    selected: Vec<Vec<(usize, &'g InputTestGroup<'a>)>>,
    deselected: Vec<Vec<&'g InputTestGroup<'a>>>,
    durations: Vec<f64>,
}

impl<'g, 'a> BucketSet<'g, 'a> {
    /// Creates `splits` empty buckets.
    pub fn new(splits: SplitCount) -> Self {
        let n = splits.get();
        Self {
            selected: vec![Vec::new(); n],
            deselected: vec![Vec::new(); n],
            durations: vec![0.0; n],
        }
    }

    /// Returns the duration accumulated so far by `bucket`.
    pub fn load(&self, bucket: usize) -> f64 {
        self.durations[bucket]
    }

    /// Assigns `group`, found at `original_index` in the input, to `bucket`
    /// and marks it deselected everywhere else.
    pub fn assign(&mut self, bucket: usize, original_index: usize, group: &'g InputTestGroup<'a>) {
        self.selected[bucket].push((original_index, group));
        self.durations[bucket] += group.duration;
        for (other, deselected) in self.deselected.iter_mut().enumerate() {
            if other != bucket {
                deselected.push(group);
            }
        }
    }

    /// Consumes the buckets and flattens them into output groups.
    pub fn build(self) -> Vec<OutputTestGroup<'a>> {
        self.selected
            .into_iter()
            .zip(self.deselected)
            .zip(self.durations)
            .map(|((mut selected, deselected), duration)| {
                selected.sort_unstable_by_key(|&(original_index, _)| original_index);
                OutputTestGroup {
                    selected: selected
                        .into_iter()
                        .flat_map(|(_, group)| group.tests.iter().copied())
                        .collect(),
                    deselected: deselected
                        .into_iter()
                        .flat_map(|group| group.tests.iter().copied())
                        .collect(),
                    duration,
                }
            })
            .collect()
    }
}
