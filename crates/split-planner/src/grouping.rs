// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Grouping of tests into weighted work units.
//!
//! A work unit is the smallest thing a strategy can place in a bucket:
//!
//! | Mode | Work unit | Order |
//! |---|---|---|
//! | [`GroupingMode::PerItem`] | one test | run order |
//! | [`GroupingMode::PerFile`] | all tests of one file | first-seen file order, members in run order |
//!
//! Per-file grouping keeps a file's tests on one worker, which helps when
//! they share expensive module-level fixtures.

use crate::estimator::DurationEstimator;
use crate::{InputTestGroup, PlannerError};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use suite_model::suite::Validated;
use suite_model::TestSuite;

/// How tests are aggregated into work units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum GroupingMode {
    /// One work unit per test.
    #[default]
    #[serde(rename = "test", alias = "item")]
    PerItem,
    /// One work unit per file component of the test id.
    #[serde(rename = "file")]
    PerFile,
}

impl GroupingMode {
    /// Returns the configuration name of this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PerItem => "test",
            Self::PerFile => "file",
        }
    }
}

impl fmt::Display for GroupingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupingMode {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "test" | "item" => Ok(Self::PerItem),
            "file" => Ok(Self::PerFile),
            other => Err(PlannerError::UnknownGroupingMode {
                name: other.to_string(),
            }),
        }
    }
}

/// Aggregates the tests of `suite` into work units according to `mode`.
///
/// Fails if `mode` is [`GroupingMode::PerFile`] and some id does not
/// contain exactly one `::` separator.
pub fn group_tests<'a>(
    mode: GroupingMode,
    suite: &'a TestSuite<Validated>,
    estimator: &DurationEstimator,
) -> Result<Vec<InputTestGroup<'a>>, PlannerError> {
    let estimates = estimator.estimate_all(suite);

    let groups = match mode {
        GroupingMode::PerItem => estimates
            .into_iter()
            .map(|(item, duration)| InputTestGroup::new(vec![item], duration))
            .collect(),
        GroupingMode::PerFile => {
            let mut groups: Vec<InputTestGroup<'a>> = Vec::new();
            let mut by_file: HashMap<&'a str, usize> = HashMap::new();

            for (item, duration) in estimates {
                let file = item.file()?;
                let slot = *by_file.entry(file).or_insert_with(|| {
                    groups.push(InputTestGroup::new(Vec::new(), 0.0));
                    groups.len() - 1
                });
                groups[slot].tests.push(item);
                groups[slot].duration += duration;
            }
            groups
        }
    };

    tracing::debug!(
        "grouped {} tests into {} work units ({mode})",
        suite.len(),
        groups.len(),
    );
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use suite_model::{DurationRecord, SuiteError};

    fn suite(ids: &[&str]) -> TestSuite<Validated> {
        TestSuite::from_ids(ids.iter().copied()).validate().unwrap()
    }

    fn ids<'a>(group: &'a InputTestGroup<'_>) -> Vec<&'a str> {
        group.tests.iter().map(|item| item.id()).collect()
    }

    #[test]
    fn test_per_item() {
        let s = suite(&["a.py::t1", "b.py::t1", "a.py::t2"]);
        let record = DurationRecord::from_entries([("a.py::t1", 2.0), ("b.py::t1", 4.0)]).unwrap();
        let est = DurationEstimator::new(&s, &record);

        let groups = group_tests(GroupingMode::PerItem, &s, &est).unwrap();
        assert_eq!(groups.len(), 3);
        assert!(groups.iter().all(|g| g.len() == 1));
        assert_eq!(ids(&groups[1]), ["b.py::t1"]);
        let durations: Vec<f64> = groups.iter().map(|g| g.duration).collect();
        assert_eq!(durations, vec![2.0, 4.0, 3.0]);
    }

    #[test]
    fn test_per_file_first_seen_order() {
        let s = suite(&["b.py::t1", "a.py::t1", "b.py::t2", "c.py::t1", "a.py::t2"]);
        let record = DurationRecord::from_entries([
            ("b.py::t1", 1.0),
            ("a.py::t1", 2.0),
            ("b.py::t2", 3.0),
            ("c.py::t1", 4.0),
            ("a.py::t2", 5.0),
        ])
        .unwrap();
        let est = DurationEstimator::new(&s, &record);

        let groups = group_tests(GroupingMode::PerFile, &s, &est).unwrap();
        assert_eq!(groups.len(), 3);
        assert_eq!(ids(&groups[0]), ["b.py::t1", "b.py::t2"]);
        assert_eq!(ids(&groups[1]), ["a.py::t1", "a.py::t2"]);
        assert_eq!(ids(&groups[2]), ["c.py::t1"]);
        assert_eq!(groups[0].duration, 4.0);
        assert_eq!(groups[1].duration, 7.0);
        assert_eq!(groups[2].duration, 4.0);
    }

    #[test]
    fn test_per_file_malformed_id() {
        let s = suite(&["a.py::t1", "a.py::Cls::t2"]);
        let est = DurationEstimator::new(&s, &DurationRecord::new());
        let err = group_tests(GroupingMode::PerFile, &s, &est).unwrap_err();
        assert!(matches!(
            err,
            PlannerError::Suite(SuiteError::MalformedId { separators: 2, .. })
        ));
    }

    #[test]
    fn test_per_item_accepts_any_id() {
        let s = suite(&["a.py::Cls::t1", "bare"]);
        let est = DurationEstimator::new(&s, &DurationRecord::new());
        let groups = group_tests(GroupingMode::PerItem, &s, &est).unwrap();
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_empty_suite() {
        let s = suite(&[]);
        let est = DurationEstimator::new(&s, &DurationRecord::new());
        assert!(group_tests(GroupingMode::PerFile, &s, &est).unwrap().is_empty());
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("test".parse::<GroupingMode>().unwrap(), GroupingMode::PerItem);
        assert_eq!("Item".parse::<GroupingMode>().unwrap(), GroupingMode::PerItem);
        assert_eq!(" FILE ".parse::<GroupingMode>().unwrap(), GroupingMode::PerFile);
        assert!(matches!(
            "module".parse::<GroupingMode>(),
            Err(PlannerError::UnknownGroupingMode { .. })
        ));
    }

    #[test]
    fn test_mode_serde() {
        assert_eq!(serde_json::to_string(&GroupingMode::PerFile).unwrap(), "\"file\"");
        let mode: GroupingMode = serde_json::from_str("\"item\"").unwrap();
        assert_eq!(mode, GroupingMode::PerItem);
    }
}
