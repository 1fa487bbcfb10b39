// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Split configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! splits = 4
//! group = 2
//! algorithm = "least_duration"
//! grouping = "file"
//! durations_path = ".test_durations"
//! tests_path = "collected.txt"
//! ```
//!
//! Every key is optional; missing keys take the [`Default`] values.

use split_planner::{Algorithm, GroupingMode, SplitCount};
use std::path::{Path, PathBuf};

/// Default location of the duration store.
pub const DEFAULT_DURATIONS_PATH: &str = ".test_durations";

/// Configuration for one worker's split.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Number of groups the suite is split into.
    pub splits: usize,
    /// 0-based index of the group this worker runs.
    pub group: usize,
    /// Algorithm name: `"duration_based_chunks"` or `"least_duration"`.
    pub algorithm: String,
    /// Grouping mode: `"test"` (one unit per test) or `"file"`.
    pub grouping: String,
    /// Path to the JSON duration store.
    pub durations_path: PathBuf,
    /// Path to the test id list (one id per line).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tests_path: Option<PathBuf>,
}

impl SplitConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, super::RuntimeError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            super::RuntimeError::ConfigError(format!(
                "cannot read config '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, super::RuntimeError> {
        toml::from_str(toml_str).map_err(|e| {
            super::RuntimeError::ConfigError(format!("TOML parse error: {e}"))
        })
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, super::RuntimeError> {
        toml::to_string_pretty(self).map_err(|e| {
            super::RuntimeError::ConfigError(format!("TOML serialise error: {e}"))
        })
    }

    /// Returns the validated split count.
    pub fn split_count(&self) -> Result<SplitCount, super::RuntimeError> {
        Ok(SplitCount::new(self.splits)?)
    }

    /// Resolves the configured algorithm from the registry.
    pub fn resolve_algorithm(&self) -> Result<Algorithm, super::RuntimeError> {
        Ok(self.algorithm.to_lowercase().parse()?)
    }

    /// Resolves the configured grouping mode.
    pub fn resolve_grouping(&self) -> Result<GroupingMode, super::RuntimeError> {
        Ok(self.grouping.parse()?)
    }

    /// Checks the whole configuration before any work is done.
    ///
    /// - `splits` is at least 1.
    /// - `group` is in `[0, splits)`.
    /// - `algorithm` and `grouping` name known entries.
    pub fn validate(&self) -> Result<(), super::RuntimeError> {
        self.split_count()?.check_group(self.group)?;
        self.resolve_algorithm()?;
        self.resolve_grouping()?;
        Ok(())
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            splits: 1,
            group: 0,
            algorithm: Algorithm::default().name().to_string(),
            grouping: GroupingMode::default().as_str().to_string(),
            durations_path: PathBuf::from(DEFAULT_DURATIONS_PATH),
            tests_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuntimeError;
    use split_planner::PlannerError;

    #[test]
    fn test_default() {
        let c = SplitConfig::default();
        assert_eq!(c.splits, 1);
        assert_eq!(c.group, 0);
        assert_eq!(c.algorithm, "duration_based_chunks");
        assert_eq!(c.grouping, "test");
        assert_eq!(c.durations_path, PathBuf::from(".test_durations"));
        c.validate().unwrap();
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
splits = 4
group = 3
algorithm = "least_duration"
grouping = "file"
durations_path = "ci/durations.json"
tests_path = "ci/tests.txt"
"#;
        let c = SplitConfig::from_toml(toml).unwrap();
        assert_eq!(c.splits, 4);
        assert_eq!(c.group, 3);
        assert_eq!(c.resolve_algorithm().unwrap(), Algorithm::LeastDuration);
        assert_eq!(c.resolve_grouping().unwrap(), GroupingMode::PerFile);
        assert_eq!(c.tests_path, Some(PathBuf::from("ci/tests.txt")));
        c.validate().unwrap();
    }

    #[test]
    fn test_from_toml_partial() {
        let c = SplitConfig::from_toml("splits = 3").unwrap();
        assert_eq!(c.splits, 3);
        assert_eq!(c.algorithm, "duration_based_chunks");
        assert!(c.tests_path.is_none());
    }

    #[test]
    fn test_from_toml_invalid() {
        assert!(matches!(
            SplitConfig::from_toml("splits = \"four\""),
            Err(RuntimeError::ConfigError(_))
        ));
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let c = SplitConfig {
            splits: 5,
            group: 1,
            tests_path: Some(PathBuf::from("tests.txt")),
            ..Default::default()
        };
        let back = SplitConfig::from_toml(&c.to_toml().unwrap()).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_zero_splits_rejected() {
        let c = SplitConfig {
            splits: 0,
            ..Default::default()
        };
        assert!(matches!(
            c.validate(),
            Err(RuntimeError::PlannerError(PlannerError::InvalidSplitCount { splits: 0 }))
        ));
    }

    #[test]
    fn test_group_out_of_range() {
        let c = SplitConfig {
            splits: 2,
            group: 2,
            ..Default::default()
        };
        assert!(matches!(
            c.validate(),
            Err(RuntimeError::PlannerError(PlannerError::GroupOutOfRange { group: 2, splits: 2 }))
        ));
    }

    #[test]
    fn test_unknown_algorithm() {
        let c = SplitConfig {
            algorithm: "random".into(),
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_algorithm_case_insensitive() {
        let c = SplitConfig {
            algorithm: "Least_Duration".into(),
            ..Default::default()
        };
        assert_eq!(c.resolve_algorithm().unwrap(), Algorithm::LeastDuration);
    }

    #[test]
    fn test_unknown_grouping() {
        let c = SplitConfig {
            grouping: "module".into(),
            ..Default::default()
        };
        assert!(matches!(
            c.validate(),
            Err(RuntimeError::PlannerError(PlannerError::UnknownGroupingMode { .. }))
        ));
    }

    #[test]
    fn test_from_missing_file() {
        let result = SplitConfig::from_file(Path::new("/nonexistent/split.toml"));
        assert!(matches!(result, Err(RuntimeError::ConfigError(_))));
    }
}
