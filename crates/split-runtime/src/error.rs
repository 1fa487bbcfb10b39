// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the split runtime.

/// Errors that can occur while loading inputs or selecting a group.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The split planner rejected the inputs.
    #[error("planner error: {0}")]
    PlannerError(#[from] split_planner::PlannerError),

    /// The test list or duration store could not be loaded.
    #[error("suite error: {0}")]
    SuiteError(#[from] suite_model::SuiteError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
