// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Named registry of partition strategies.
//!
//! Each [`Algorithm`] variant maps to one [`SplitFn`]. Adding a strategy
//! means adding a variant, its name, and its function; callers that look
//! algorithms up by name pick it up automatically.

use crate::strategy::{duration_chunks, least_duration, SplitFn};
use crate::{InputTestGroup, OutputTestGroup, PlannerError, SplitCount};
use std::fmt;
use std::str::FromStr;

/// The available partition strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Contiguous chunks of roughly equal duration. See
    /// [`duration_chunks`].
    #[default]
    DurationBasedChunks,
    /// Greedy longest-first bin packing. See [`least_duration`].
    LeastDuration,
}

impl Algorithm {
    /// Every registered algorithm, in registry order.
    pub const ALL: [Algorithm; 2] = [Algorithm::DurationBasedChunks, Algorithm::LeastDuration];

    /// Returns the registry name of this algorithm.
    pub fn name(self) -> &'static str {
        match self {
            Self::DurationBasedChunks => "duration_based_chunks",
            Self::LeastDuration => "least_duration",
        }
    }

    /// Returns the names of all registered algorithms.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|a| a.name()).collect()
    }

    /// Looks an algorithm up by its registry name.
    pub fn from_name(name: &str) -> Result<Self, PlannerError> {
        Self::ALL
            .into_iter()
            .find(|a| a.name() == name)
            .ok_or_else(|| PlannerError::UnknownAlgorithm {
                name: name.to_string(),
                expected: Self::names().join(", "),
            })
    }

    /// Returns the strategy function.
    pub fn function(self) -> SplitFn {
        match self {
            Self::DurationBasedChunks => duration_chunks::partition,
            Self::LeastDuration => least_duration::partition,
        }
    }

    /// Runs this strategy over `groups`.
    pub fn partition<'a>(
        self,
        splits: SplitCount,
        groups: &[InputTestGroup<'a>],
    ) -> Vec<OutputTestGroup<'a>> {
        tracing::info!(
            "splitting {} work units into {splits} groups with '{self}'",
            groups.len(),
        );
        (self.function())(splits, groups)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s.trim())
    }
}
