// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The splitter with a type-state–enforced pipeline.
//!
//! ```text
//! Splitter<Idle>
//!     │  .load()            (or Splitter::from_parts)
//!     ▼
//! Splitter<Loaded>
//!     │  .plan() / .selection() / .report()
//!     ▼
//!   SplitPlan / Selection / SplitReport
//! ```
//!
//! The configuration is validated before any input is read, so a bad
//! split count or group index never costs a file read.

use crate::{RuntimeError, SplitConfig, SplitReport};
use split_planner::{plan_split, Algorithm, GroupingMode, SplitPlan};
use suite_model::suite::Validated;
use suite_model::{DurationRecord, SuiteError, TestSuite};

// ── Type-state markers ─────────────────────────────────────────

/// Splitter is configured but has no inputs yet.
#[derive(Debug)]
pub struct Idle;

/// Splitter holds a validated suite and its duration history.
#[derive(Debug)]
pub struct Loaded {
    suite: TestSuite<Validated>,
    record: DurationRecord,
}

/// Sealed trait for splitter states.
pub trait SplitterState: std::fmt::Debug {}
impl SplitterState for Idle {}
impl SplitterState for Loaded {}

// ── Selection ──────────────────────────────────────────────────

/// The slice of the suite one worker runs.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Selection {
    /// 0-based group index.
    pub group: usize,
    /// Number of groups in the split.
    pub splits: usize,
    /// Algorithm used.
    pub algorithm: Algorithm,
    /// Grouping mode used.
    pub grouping: GroupingMode,
    /// Ids to run, in run order.
    pub selected: Vec<String>,
    /// Ids assigned to other groups.
    pub deselected: Vec<String>,
    /// Estimated duration of the selected tests in seconds.
    pub duration: f64,
}

// ── Splitter ───────────────────────────────────────────────────

/// Computes a worker's share of the suite.
///
/// # Example
/// ```
/// use split_runtime::{SplitConfig, Splitter};
/// use suite_model::{DurationRecord, TestSuite};
///
/// let config = SplitConfig { splits: 2, group: 1, ..Default::default() };
/// let suite = TestSuite::from_ids(["a.py::t1", "a.py::t2"]).validate().unwrap();
///
/// let selection = Splitter::from_parts(config, suite, DurationRecord::new())
///     .unwrap()
///     .selection()
///     .unwrap();
/// assert_eq!(selection.selected, ["a.py::t2"]);
/// ```
#[derive(Debug)]
pub struct Splitter<S: SplitterState = Idle> {
    config: SplitConfig,
    state: S,
}

// ── Idle → Loaded ──────────────────────────────────────────────

impl Splitter<Idle> {
    /// Creates a new splitter from the given configuration.
    pub fn new(config: SplitConfig) -> Self {
        tracing::info!(
            "splitter created: group {} of {} with '{}'",
            config.group,
            config.splits,
            config.algorithm,
        );
        Self { config, state: Idle }
    }

    /// Reads the test list and duration store named in the configuration.
    /// Transitions to the `Loaded` state.
    ///
    /// A missing duration store is not an error: the split then runs with
    /// no history, as on a first run.
    pub fn load(self) -> Result<Splitter<Loaded>, RuntimeError> {
        self.config.validate()?;

        let tests_path = self.config.tests_path.as_deref().ok_or_else(|| {
            RuntimeError::ConfigError("no test id list configured (tests_path)".into())
        })?;
        let suite = TestSuite::from_file(tests_path)?.validate()?;

        let durations_path = &self.config.durations_path;
        let record = match DurationRecord::from_file(durations_path) {
            Ok(record) => record,
            Err(SuiteError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    "duration store '{}' not found; assuming equal durations",
                    durations_path.display(),
                );
                DurationRecord::new()
            }
            Err(e) => return Err(e.into()),
        };

        Splitter::from_parts(self.config, suite, record)
    }
}

impl Splitter<Loaded> {
    /// Builds a loaded splitter from in-memory inputs.
    pub fn from_parts(
        config: SplitConfig,
        suite: TestSuite<Validated>,
        record: DurationRecord,
    ) -> Result<Self, RuntimeError> {
        config.validate()?;
        tracing::debug!(
            "splitter loaded: {} tests, {} recorded durations",
            suite.len(),
            record.len(),
        );
        Ok(Self {
            config,
            state: Loaded { suite, record },
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Returns the loaded suite.
    pub fn suite(&self) -> &TestSuite<Validated> {
        &self.state.suite
    }

    /// Returns the loaded duration history.
    pub fn record(&self) -> &DurationRecord {
        &self.state.record
    }

    /// Computes the full split with the configured algorithm.
    pub fn plan(&self) -> Result<SplitPlan<'_>, RuntimeError> {
        self.plan_with(self.config.resolve_algorithm()?)
    }

    /// Computes the full split with `algorithm`, keeping every other
    /// configured parameter.
    pub fn plan_with(&self, algorithm: Algorithm) -> Result<SplitPlan<'_>, RuntimeError> {
        Ok(plan_split(
            &self.state.suite,
            &self.state.record,
            self.config.resolve_grouping()?,
            algorithm,
            self.config.split_count()?,
        )?)
    }

    /// Computes the split and extracts the configured group.
    pub fn selection(&self) -> Result<Selection, RuntimeError> {
        let plan = self.plan()?;
        let group = plan.group(self.config.group)?;

        tracing::info!(
            "group {}/{}: {} selected, {} deselected, {:.2}s estimated",
            self.config.group,
            self.config.splits,
            group.num_selected(),
            group.deselected.len(),
            group.duration,
        );

        Ok(Selection {
            group: self.config.group,
            splits: plan.splits.get(),
            algorithm: plan.algorithm,
            grouping: plan.grouping,
            selected: group.selected_ids().map(str::to_string).collect(),
            deselected: group.deselected.iter().map(|i| i.id().to_string()).collect(),
            duration: group.duration,
        })
    }

    /// Computes the split and summarises every group.
    pub fn report(&self) -> Result<SplitReport, RuntimeError> {
        Ok(SplitReport::from_plan(&self.plan()?))
    }
}
