// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tsplit
//!
//! Command-line interface for duration-balanced test splitting.
//!
//! ## Usage
//! ```bash
//! # Ids this worker (group 2 of 4) should run
//! tsplit select --tests collected.txt --durations .test_durations --splits 4 --group 2
//!
//! # Inspect the whole split
//! tsplit plan --tests collected.txt --splits 4 --algorithm least_duration --grouping file
//!
//! # List algorithms, or the slowest recorded tests
//! tsplit algorithms
//! tsplit slowest --durations .test_durations -n 20
//! ```

mod commands;

use clap::{Parser, Subcommand};
use commands::SplitArgs;

#[derive(Parser)]
#[command(
    name = "tsplit",
    about = "Split a test suite into groups of similar total duration",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file (CLI arguments override it).
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the test ids one group should run.
    Select {
        #[command(flatten)]
        split: SplitArgs,

        /// 0-based index of the group to print.
        #[arg(short, long)]
        group: Option<usize>,

        /// Print the ids assigned to other groups instead.
        #[arg(long)]
        deselected: bool,

        /// Print the full selection as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show every group of the split and compare algorithms.
    Plan {
        #[command(flatten)]
        split: SplitArgs,

        /// Print the split report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the available splitting algorithms.
    Algorithms,

    /// List the slowest tests in the duration store.
    Slowest {
        /// Path to the JSON duration store.
        #[arg(short, long)]
        durations: Option<std::path::PathBuf>,

        /// Number of tests to show.
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the ids.
    commands::init_tracing(cli.verbose);

    let base = commands::base_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Select {
            split,
            group,
            deselected,
            json,
        } => {
            let mut config = split.apply(base);
            if let Some(group) = group {
                config.group = group;
            }
            commands::select::execute(config, deselected, json).await
        }
        Commands::Plan { split, json } => commands::plan::execute(split.apply(base), json).await,
        Commands::Algorithms => commands::algorithms::execute(&base).await,
        Commands::Slowest { durations, count } => {
            let path = durations.unwrap_or(base.durations_path);
            commands::slowest::execute(path, count).await
        }
    }
}
