// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared helpers.

pub mod algorithms;
pub mod plan;
pub mod select;
pub mod slowest;

use anyhow::Context;
use split_runtime::{Loaded, SplitConfig, Splitter};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Split parameters shared by `select` and `plan`.
#[derive(Debug, clap::Args)]
pub struct SplitArgs {
    /// File with one test id per line.
    #[arg(short, long)]
    pub tests: Option<PathBuf>,

    /// Path to the JSON duration store [default: .test_durations].
    #[arg(short, long)]
    pub durations: Option<PathBuf>,

    /// Number of groups to split into.
    #[arg(short, long)]
    pub splits: Option<usize>,

    /// Splitting algorithm: duration_based_chunks, least_duration.
    #[arg(short, long)]
    pub algorithm: Option<String>,

    /// Work unit: test (one per test) or file (one per file).
    #[arg(long)]
    pub grouping: Option<String>,
}

impl SplitArgs {
    /// Overrides `config` with every argument that was given.
    pub fn apply(self, mut config: SplitConfig) -> SplitConfig {
        if let Some(tests) = self.tests {
            config.tests_path = Some(tests);
        }
        if let Some(durations) = self.durations {
            config.durations_path = durations;
        }
        if let Some(splits) = self.splits {
            config.splits = splits;
        }
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        if let Some(grouping) = self.grouping {
            config.grouping = grouping;
        }
        config
    }
}

/// Loads the `--config` file, or the defaults when none is given.
pub fn base_config(path: Option<&Path>) -> anyhow::Result<SplitConfig> {
    match path {
        Some(path) => Ok(SplitConfig::from_file(path)?),
        None => Ok(SplitConfig::default()),
    }
}

/// Reads the configured inputs off the async runtime.
pub async fn load_splitter(config: SplitConfig) -> anyhow::Result<Splitter<Loaded>> {
    let splitter = tokio::task::spawn_blocking(move || Splitter::new(config).load())
        .await
        .context("input loading task failed")??;
    Ok(splitter)
}

/// Initialises the tracing subscriber from the `-v` count.
///
/// `RUST_LOG` takes precedence when set.
pub fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
