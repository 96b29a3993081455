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
//! The `check` subcommand (§6): re-hash every indexed path and flag any
//! unindexed file under the cold root. Verification failures are counted
//! and reported, never fatal on their own.

use crate::checksum;
use crate::error::DintactError;
use crate::ignorefile::IgnoreChain;
use crate::index;
use crate::output;
use crate::progress::{BarProgress, NoopProgress, Progress};
use crate::walk;
use anyhow::Result;
use std::path::Path;

/// Returns `true` when the cold tree is intact. Never returns `Err` for a
/// verification mismatch — only for a structurally unreadable index or a
/// missing root.
pub fn check(cold_root: &Path) -> Result<bool> {
    if !cold_root.is_dir() {
        return Err(DintactError::RootMissing { which: "cold", path: cold_root.to_path_buf() }.into());
    }

    output::banner("dintact check");
    output::rule();
    let idx = index::load(cold_root)?;
    let mut failures = 0u32;

    let bar = BarProgress::new(idx.len() as u64, "checking");
    for (path, expected) in idx.iter() {
        let actual = checksum::hash_file(&cold_root.join(&path), &NoopProgress);
        if actual != expected {
            eprintln!("Verification failed: '{path}'.");
            failures += 1;
        }
        bar.inc(1);
    }
    bar.finish("verification complete".to_string());

    for rel in walk::walk(cold_root, &IgnoreChain::new())? {
        let rel_str = rel.to_string_lossy().replace('\\', "/");
        if rel_str == "index.txt" {
            continue;
        }
        if !idx.contains(&rel_str) {
            eprintln!("Unindexed file present: '{rel_str}'.");
            failures += 1;
        }
    }

    if failures == 0 {
        output::ok("Data is intact!");
        Ok(true)
    } else {
        output::fail(&format!("There were {failures} failures!"));
        Ok(false)
    }
}
