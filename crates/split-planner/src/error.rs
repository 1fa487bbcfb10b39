// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the split planner.

/// Errors that can occur while planning a split.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// The requested number of groups is zero.
    #[error("split count must be at least 1, got {splits}")]
    InvalidSplitCount { splits: usize },

    /// The requested group index is outside `[0, splits)`.
    #[error("group index {group} out of range: expected 0..{splits}")]
    GroupOutOfRange { group: usize, splits: usize },

    /// No algorithm is registered under the given name.
    #[error("unknown algorithm '{name}'; expected one of: {expected}")]
    UnknownAlgorithm { name: String, expected: String },

    /// The grouping mode name is not recognised.
    #[error("unknown grouping mode '{name}'; expected 'test' or 'file'")]
    UnknownGroupingMode { name: String },

    /// A suite-level error, e.g. a test id that cannot be split by file.
    #[error("suite error: {0}")]
    Suite(#[from] suite_model::SuiteError),

    /// A strategy produced a plan that breaks the split invariants.
    #[error("strategy '{strategy}' failed: {detail}")]
    StrategyFailed { strategy: String, detail: String },
}
