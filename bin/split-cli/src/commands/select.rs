// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `tsplit select` command: print the ids one worker runs.
//!
//! Output is one id per line so it can be fed straight to a test runner,
//! e.g. `pytest $(tsplit select ...)`.

use split_runtime::SplitConfig;

pub async fn execute(config: SplitConfig, deselected: bool, json: bool) -> anyhow::Result<()> {
    let splitter = super::load_splitter(config).await?;
    let selection = splitter.selection()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&selection)?);
        return Ok(());
    }

    let ids = if deselected {
        &selection.deselected
    } else {
        &selection.selected
    };
    for id in ids {
        println!("{id}");
    }

    tracing::info!(
        "printed {} ids for group {} of {}",
        ids.len(),
        selection.group,
        selection.splits,
    );
    Ok(())
}
