// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Per-group split report.
//!
//! [`SplitReport`] condenses a plan into test counts and durations per
//! group. It owns no test ids, so it can outlive the suite and be printed
//! or serialised freely.

use split_planner::{Algorithm, GroupingMode, SplitPlan};

/// Statistics for one group.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct GroupReport {
    /// 0-based group index.
    pub group: usize,
    /// Number of selected tests.
    pub tests: usize,
    /// Estimated duration of the selected tests in seconds.
    pub duration: f64,
}

/// Aggregate statistics for a whole split.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SplitReport {
    /// Algorithm that produced the split.
    pub algorithm: Algorithm,
    /// Grouping mode used.
    pub grouping: GroupingMode,
    /// Total number of tests.
    pub total_tests: usize,
    /// Total estimated duration in seconds.
    pub total_duration: f64,
    /// Per-group statistics, in group order.
    pub groups: Vec<GroupReport>,
}

impl SplitReport {
    /// Builds a report from a plan.
    pub fn from_plan(plan: &SplitPlan<'_>) -> Self {
        Self {
            algorithm: plan.algorithm,
            grouping: plan.grouping,
            total_tests: plan.total_tests,
            total_duration: plan.total_duration,
            groups: plan
                .groups
                .iter()
                .enumerate()
                .map(|(group, g)| GroupReport {
                    group,
                    tests: g.num_selected(),
                    duration: g.duration,
                })
                .collect(),
        }
    }

    /// Returns the longest group duration.
    pub fn max_duration(&self) -> f64 {
        self.groups.iter().map(|g| g.duration).fold(0.0, f64::max)
    }

    /// Returns the mean group duration.
    pub fn mean_duration(&self) -> f64 {
        if self.groups.is_empty() {
            return 0.0;
        }
        self.total_duration / self.groups.len() as f64
    }

    /// Returns `max / mean`: 1.0 is a perfect balance.
    pub fn imbalance(&self) -> f64 {
        let mean = self.mean_duration();
        if mean <= 0.0 {
            return 1.0;
        }
        self.max_duration() / mean
    }

    /// Returns a human-readable summary suitable for CLI output.
    pub fn summary(&self) -> String {
        format!(
            "Split '{}' ({}): {} tests in {} groups, {:.2}s total, \
             longest group {:.2}s, mean {:.2}s (imbalance {:.2}x)",
            self.algorithm,
            self.grouping,
            self.total_tests,
            self.groups.len(),
            self.total_duration,
            self.max_duration(),
            self.mean_duration(),
            self.imbalance(),
        )
    }
}
