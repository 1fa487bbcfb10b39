// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # split-planner
//!
//! Splits a validated `TestSuite` into N groups of similar total duration,
//! deterministically, so that every worker can compute the full split on
//! its own and run only its slice.
//!
//! # Pipeline
//!
//! ```text
//! suite + history ─► DurationEstimator ─► group_tests ─► Algorithm ─► SplitPlan
//! ```
//!
//! # Strategies
//!
//! | Algorithm | Order in bucket | Buckets contiguous | Balance |
//! |---|---|---|---|
//! | [`Algorithm::DurationBasedChunks`] | run order | yes | fair |
//! | [`Algorithm::LeastDuration`] | run order | no | good |
//!
//! # Example
//! ```
//! use split_planner::{plan_split, Algorithm, GroupingMode, SplitCount};
//! use suite_model::{DurationRecord, TestSuite};
//!
//! let suite = TestSuite::from_ids(["a.py::t1", "a.py::t2", "b.py::t1"])
//!     .validate()
//!     .unwrap();
//! let record = DurationRecord::from_entries([
//!     ("a.py::t1", 4.0),
//!     ("a.py::t2", 1.0),
//!     ("b.py::t1", 1.0),
//! ])
//! .unwrap();
//!
//! let plan = plan_split(
//!     &suite,
//!     &record,
//!     GroupingMode::PerItem,
//!     Algorithm::LeastDuration,
//!     SplitCount::new(2).unwrap(),
//! )
//! .unwrap();
//!
//! let mine: Vec<&str> = plan.group(0).unwrap().selected_ids().collect();
//! assert_eq!(mine, ["a.py::t1"]);
//! ```

mod error;
pub mod estimator;
pub mod grouping;
pub(crate) mod plan;
pub mod registry;
pub mod strategy;

pub use error::PlannerError;
pub use estimator::DurationEstimator;
pub use grouping::{group_tests, GroupingMode};
pub use plan::{InputTestGroup, OutputTestGroup, SplitCount, SplitPlan};
pub use registry::Algorithm;
pub use strategy::SplitFn;

use suite_model::suite::Validated;
use suite_model::{DurationRecord, TestSuite};

/// Estimates, groups and partitions `suite` in one call.
///
/// The returned plan borrows its tests from `suite` and has already been
/// checked with [`SplitPlan::validate`].
pub fn plan_split<'a>(
    suite: &'a TestSuite<Validated>,
    record: &DurationRecord,
    grouping: GroupingMode,
    algorithm: Algorithm,
    splits: SplitCount,
) -> Result<SplitPlan<'a>, PlannerError> {
    let estimator = DurationEstimator::new(suite, record);
    let groups = group_tests(grouping, suite, &estimator)?;
    let total_duration = groups.iter().map(|g| g.duration).sum();

    let plan = SplitPlan {
        algorithm,
        grouping,
        splits,
        groups: algorithm.partition(splits, &groups),
        total_tests: suite.len(),
        total_duration,
    };
    plan.validate()?;

    tracing::info!("{}", plan.summary());
    Ok(plan)
}
