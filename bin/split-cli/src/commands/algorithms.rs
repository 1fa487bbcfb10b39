// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `tsplit algorithms` command: list the registered algorithms.

use split_planner::Algorithm;
use split_runtime::SplitConfig;

pub async fn execute(config: &SplitConfig) -> anyhow::Result<()> {
    let configured = config.resolve_algorithm().ok();

    for algorithm in Algorithm::ALL {
        let mut notes = Vec::new();
        if algorithm == Algorithm::default() {
            notes.push("default");
        }
        if Some(algorithm) == configured {
            notes.push("configured");
        }

        if notes.is_empty() {
            println!("{algorithm}");
        } else {
            println!("{algorithm}  ({})", notes.join(", "));
        }
    }
    Ok(())
}
