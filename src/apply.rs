// ─────────────────────────────────────────────────────────────────────────────
// dintact v0.1.0
// Copyright 2026 Ankit Chaubey <ankitchaubey.dev@gmail.com>
// github.com/ankit-chaubey
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// All rights reserved 2026.
// ─────────────────────────────────────────────────────────────────────────────
//! The `sync` driver (§4.H): load the index, diff the trees, post-process,
//! confirm with the user, apply, and persist.

use crate::change::Change;
use crate::error::DintactError;
use crate::fsutil;
use crate::ignorefile::IgnoreChain;
use crate::index;
use crate::output;
use crate::progress::{BarProgress, Progress};
use crate::{diff, postprocess, prompt, walk};
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

pub fn sync(hot_root: &Path, cold_root: &Path) -> Result<()> {
    if !hot_root.is_dir() {
        return Err(DintactError::RootMissing { which: "hot", path: hot_root.to_path_buf() }.into());
    }
    if !cold_root.is_dir() {
        return Err(DintactError::RootMissing { which: "cold", path: cold_root.to_path_buf() }.into());
    }

    output::banner("dintact sync");
    output::rule();

    let mut idx = index::load(cold_root)?;

    let hot_rules = walk::child_rules(hot_root, &IgnoreChain::new())?;
    let cold_rules = walk::child_rules(cold_root, &IgnoreChain::new())?;
    let total =
        walk::total_relevant_size(hot_root, &hot_rules)? + walk::total_relevant_size(cold_root, &cold_rules)?;

    let scan_bar = BarProgress::new(total, "scanning");
    let mut changes = diff::walk_trees(hot_root, cold_root, &idx, &scan_bar)?;
    scan_bar.finish("scan complete".to_string());

    postprocess::ignore_index(&mut changes);
    let changes = postprocess::find_moveds(changes);
    let mut changes = postprocess::find_deduplications(changes, &idx);
    changes.sort_by(|a, b| a.path().cmp(b.path()));

    if changes.is_empty() {
        output::ok("Already in sync, nothing to do.");
        return Ok(());
    }

    output::info(&format!("{} candidate change(s):", changes.len()));
    let mut actions: Vec<Change> = Vec::new();
    for change in changes {
        describe(&change);
        if prompt::confirm("Apply this change?")? {
            actions.push(change);
        }
    }

    if actions.is_empty() {
        output::info("No actions selected.");
        return Ok(());
    }

    if !prompt::confirm(&format!("Commence {} action(s)?", actions.len()))? {
        return Err(DintactError::UserAbort.into());
    }

    let total_bytes: u64 = actions.iter().map(Change::size).sum();
    let apply_bar = BarProgress::new(total_bytes, "applying");
    for mut action in actions {
        action.apply(hot_root, cold_root, &mut idx, &apply_bar)?;
    }
    apply_bar.finish("apply complete".to_string());

    index::store(cold_root, &idx)?;
    output::rule();
    output::ok(&format!(
        "Synced {} moved. Index now tracks {} file(s).",
        fsutil::human(total_bytes),
        idx.len()
    ));
    Ok(())
}

fn describe(change: &Change) {
    let size = change.size();
    let size_suffix = if size > 0 {
        format!(" ({})", fsutil::human(size))
    } else {
        String::new()
    };
    let line = match change {
        Change::Removed { has_been, .. } if !has_been.is_empty() => {
            format!(
                "{}: {}{size_suffix} (content survives at: {})",
                change.label(),
                change.path().yellow(),
                has_been.join(", ")
            )
        }
        _ => format!("{}: {}{size_suffix}", change.label(), change.path().yellow()),
    };
    output::info(&format!("  - {line}"));
}
