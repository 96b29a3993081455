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
//! Directory walking (§4.C): depth-first, single-threaded, honoring the
//! ignore rule stack. A directory is relevant only if it contains at
//! least one relevant descendant file — empty directories never appear.

use crate::ignorefile::{IgnoreChain, IgnoreRule};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

struct ScanEntry {
    name: String,
    is_file: bool,
    is_dir: bool,
    size: u64,
}

/// Read a directory's immediate children, sorted by name. Follows
/// symlinks at stat time, per the filesystem surface contract.
fn scan(dir: &Path) -> Result<Vec<ScanEntry>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        let meta = fs::metadata(&path)
            .with_context(|| format!("stat'ing {}", path.display()))?;
        out.push(ScanEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_file: meta.is_file(),
            is_dir: meta.is_dir(),
            size: meta.len(),
        });
    }
    out.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(out)
}

/// Extend `base` with `dir`'s own `.gitignore`, if it has one.
pub fn child_rules(dir: &Path, base: &IgnoreChain) -> Result<IgnoreChain> {
    match IgnoreRule::load(dir)? {
        Some(rule) => Ok(base.appended(rule)),
        None => Ok(base.clone()),
    }
}

/// Whether `dir` has at least one relevant file anywhere beneath it.
fn has_relevant_descendant(dir: &Path, rules: &IgnoreChain) -> Result<bool> {
    for entry in scan(dir)? {
        let path = dir.join(&entry.name);
        if rules.is_ignored(&path, entry.is_dir) {
            continue;
        }
        if entry.is_file {
            return Ok(true);
        } else if entry.is_dir {
            let nested = child_rules(&path, rules)?;
            if has_relevant_descendant(&path, &nested)? {
                return Ok(true);
            }
        } else {
            anyhow::bail!("unsupported file type at {}", path.display());
        }
    }
    Ok(false)
}

/// The relevant immediate children of `dir`: files not ignored, and
/// directories that contain at least one relevant descendant.
pub fn relevant_children(dir: &Path, rules: &IgnoreChain) -> Result<Vec<String>> {
    let mut out = Vec::new();
    for entry in scan(dir)? {
        let path = dir.join(&entry.name);
        if rules.is_ignored(&path, entry.is_dir) {
            continue;
        }
        if entry.is_file {
            out.push(entry.name);
        } else if entry.is_dir {
            let nested = child_rules(&path, rules)?;
            if has_relevant_descendant(&path, &nested)? {
                out.push(entry.name);
            }
        } else {
            anyhow::bail!("unsupported file type at {}", path.display());
        }
    }
    Ok(out)
}

/// Depth-first walk of `root`, yielding every relevant regular file as a
/// path relative to `root`. Unknown file types (sockets, FIFOs, ...) are
/// errors rather than being silently skipped.
pub fn walk(root: &Path, rules: &IgnoreChain) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    walk_into(root, root, rules, &mut out)?;
    Ok(out)
}

fn walk_into(base: &Path, dir: &Path, rules: &IgnoreChain, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in scan(dir)? {
        let path = dir.join(&entry.name);
        if rules.is_ignored(&path, entry.is_dir) {
            continue;
        }
        if entry.is_file {
            let rel = path.strip_prefix(base).unwrap_or(&path).to_path_buf();
            out.push(rel);
        } else if entry.is_dir {
            let nested = child_rules(&path, rules)?;
            walk_into(base, &path, &nested, out)?;
        } else {
            anyhow::bail!("unsupported file type at {}", path.display());
        }
    }
    Ok(())
}

/// Sum of the byte sizes of every relevant file under `root`, used to
/// size the progress bar before the hashing pass begins.
pub fn total_relevant_size(root: &Path, rules: &IgnoreChain) -> Result<u64> {
    let mut total = 0u64;
    total_size_into(root, rules, &mut total)?;
    Ok(total)
}

fn total_size_into(dir: &Path, rules: &IgnoreChain, total: &mut u64) -> Result<()> {
    for entry in scan(dir)? {
        let path = dir.join(&entry.name);
        if rules.is_ignored(&path, entry.is_dir) {
            continue;
        }
        if entry.is_file {
            *total += entry.size;
        } else if entry.is_dir {
            let nested = child_rules(&path, rules)?;
            total_size_into(&path, &nested, total)?;
        } else {
            anyhow::bail!("unsupported file type at {}", path.display());
        }
    }
    Ok(())
}
