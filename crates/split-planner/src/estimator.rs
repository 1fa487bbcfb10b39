// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Duration estimation for tests without history.
//!
//! Tests missing from the duration record are assumed to take the average
//! of the recorded tests. The average only counts tests that are in the
//! current suite, so a record full of long-deleted slow tests cannot skew
//! it:
//!
//! ```text
//! relevant = record ∩ suite
//! average  = sum(relevant) / |relevant|      (1.0 if relevant is empty)
//! estimate = record[id] if id ∈ relevant else average
//! ```
//!
//! With no history at all every test weighs the same.

use suite_model::suite::Validated;
use suite_model::{DurationRecord, TestSuite, WorkItem};

/// Duration assumed for every test when no relevant history exists.
pub const DEFAULT_DURATION_SECS: f64 = 1.0;

/// Returns the mean of the record's durations, or
/// [`DEFAULT_DURATION_SECS`] for an empty record.
pub fn average_duration(record: &DurationRecord) -> f64 {
    if record.is_empty() {
        DEFAULT_DURATION_SECS
    } else {
        record.total_seconds() / record.len() as f64
    }
}

/// Per-test duration estimates for one suite.
#[derive(Debug, Clone)]
pub struct DurationEstimator {
    relevant: DurationRecord,
    average: f64,
}

impl DurationEstimator {
    /// Builds an estimator from the suite of the current run and the
    /// historical record. Entries for tests not in `suite` are discarded
    /// before the average is computed.
    pub fn new(suite: &TestSuite<Validated>, record: &DurationRecord) -> Self {
        let relevant = record.relevant_to(suite);
        let average = average_duration(&relevant);

        tracing::debug!(
            "duration history: {} relevant, {} stale, {} missing; average {:.3}s",
            relevant.len(),
            record.len() - relevant.len(),
            suite.len() - relevant.len(),
            average,
        );

        Self { relevant, average }
    }

    /// Returns the duration assumed for tests without history.
    pub fn average(&self) -> f64 {
        self.average
    }

    /// Returns how many tests in the suite have recorded durations.
    pub fn relevant_count(&self) -> usize {
        self.relevant.len()
    }

    /// Returns the estimated duration of `item` in seconds.
    pub fn estimate(&self, item: &WorkItem) -> f64 {
        self.relevant.get(item.id()).unwrap_or(self.average)
    }

    /// Pairs every test in `suite` with its estimate, in run order.
    pub fn estimate_all<'a>(&self, suite: &'a TestSuite<Validated>) -> Vec<(&'a WorkItem, f64)> {
        suite.iter().map(|item| (item, self.estimate(item))).collect()
    }
}
