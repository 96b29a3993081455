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
//! Raw filesystem primitives and small formatting helpers.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;

/// Recursively copy `source` (file or directory) to `target`. `target` must
/// not already exist.
pub fn cp(source: &Path, target: &Path) -> Result<()> {
    anyhow::ensure!(
        source.exists(),
        "cannot copy, source does not exist: {}",
        source.display()
    );
    anyhow::ensure!(
        !target.exists(),
        "refusing to copy over existing path: {}",
        target.display()
    );

    if source.is_dir() {
        copy_dir_recursive(source, target)
            .with_context(|| format!("copying {} -> {}", source.display(), target.display()))
    } else {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(source, target)
            .with_context(|| format!("copying {} -> {}", source.display(), target.display()))?;
        Ok(())
    }
}

fn copy_dir_recursive(source: &Path, target: &Path) -> Result<()> {
    fs::create_dir_all(target)?;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let from = entry.path();
        let to = target.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&from, &to)?;
        } else {
            fs::copy(&from, &to)?;
        }
    }
    Ok(())
}

/// Recursively remove `target` (file or directory). `target` must exist.
pub fn rm(target: &Path) -> Result<()> {
    anyhow::ensure!(
        target.exists() || target.symlink_metadata().is_ok(),
        "cannot remove, does not exist: {}",
        target.display()
    );

    if target.is_dir() {
        fs::remove_dir_all(target)
            .with_context(|| format!("removing directory {}", target.display()))
    } else {
        fs::remove_file(target).with_context(|| format!("removing file {}", target.display()))
    }
}

/// Rename within a single tree (used for `Moved`).
pub fn mv(source: &Path, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::rename(source, target)
        .with_context(|| format!("renaming {} -> {}", source.display(), target.display()))
}

/// Format a byte count as a human-readable size (e.g. "1.5 MiB").
pub fn human(bytes: u64) -> String {
    use humansize::{format_size, BINARY};
    format_size(bytes, BINARY)
}

/// Current UNIX timestamp in seconds.
pub fn now() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Render a UNIX timestamp as ISO-8601 with a UTC offset.
pub fn iso8601(unix: u64) -> String {
    DateTime::<Utc>::from_timestamp(unix as i64, 0)
        .unwrap_or_default()
        .to_rfc3339()
}
