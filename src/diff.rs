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
//! Recursive three-way tree diff (§4.F). Compares a hot subtree, a cold
//! subtree, and the corresponding index node, emitting the outermost
//! enclosing change for any asymmetric region instead of descending into
//! it file-by-file.

use crate::change::Change;
use crate::checksum::{self, Checksum};
use crate::error::DintactError;
use crate::ignorefile::IgnoreChain;
use crate::index::{Index, IndexValue};
use crate::progress::Progress;
use crate::walk;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

fn join(rel: &str, name: &str) -> String {
    if rel.is_empty() {
        name.to_string()
    } else {
        format!("{rel}/{name}")
    }
}

fn path_for(root: &Path, rel: &str) -> PathBuf {
    if rel.is_empty() {
        root.to_path_buf()
    } else {
        root.join(rel)
    }
}

fn collision(rel: &str) -> anyhow::Error {
    DintactError::NameCollision { path: rel.into() }.into()
}

/// Entry point: diff the whole hot/cold tree pair against `index`.
pub fn walk_trees(
    hot_root: &Path,
    cold_root: &Path,
    index: &Index,
    progress: &dyn Progress,
) -> Result<Vec<Change>> {
    let hot_rules = walk::child_rules(hot_root, &IgnoreChain::new())?;
    let cold_rules = walk::child_rules(cold_root, &IgnoreChain::new())?;
    let mut out = Vec::new();
    walk_trees_at(
        "",
        Some(IndexValue::Dir(index.clone())),
        hot_root,
        cold_root,
        &hot_rules,
        &cold_rules,
        progress,
        &mut out,
    )?;
    Ok(out)
}

/// Recurse at relative path `rel`. Callers guarantee `hot_root/rel` and
/// `cold_root/rel` both exist — asymmetric presence is resolved by the
/// parent before recursing (§4.F step 5/6).
fn walk_trees_at(
    rel: &str,
    index_value: Option<IndexValue>,
    hot_root: &Path,
    cold_root: &Path,
    hot_rules: &IgnoreChain,
    cold_rules: &IgnoreChain,
    progress: &dyn Progress,
    out: &mut Vec<Change>,
) -> Result<()> {
    let hot_path = path_for(hot_root, rel);
    let cold_path = path_for(cold_root, rel);
    let hot_meta =
        fs::metadata(&hot_path).with_context(|| format!("stat'ing {}", hot_path.display()))?;
    let cold_meta =
        fs::metadata(&cold_path).with_context(|| format!("stat'ing {}", cold_path.display()))?;

    if hot_meta.is_file() && cold_meta.is_file() {
        if matches!(index_value, Some(IndexValue::Dir(_))) {
            return Err(collision(rel));
        }
        let idx_checksum = match index_value {
            Some(IndexValue::File(c)) => Some(c),
            _ => None,
        };
        let (hot_hash, cold_hash, equal) =
            checksum::hash_compare_files(&hot_path, &cold_path, progress);
        let size = hot_meta.len();
        if let Some(change) =
            classify_file_case(rel, idx_checksum.as_ref(), &hot_hash, &cold_hash, equal, size)
        {
            out.push(change);
        }
        return Ok(());
    }

    if hot_meta.is_file() != cold_meta.is_file() {
        return Err(collision(rel));
    }
    if matches!(index_value, Some(IndexValue::File(_))) {
        return Err(collision(rel));
    }

    let index_dir = match &index_value {
        Some(IndexValue::Dir(d)) => Some(d),
        _ => None,
    };

    let hot_children: HashSet<String> =
        walk::relevant_children(&hot_path, hot_rules)?.into_iter().collect();
    let cold_children: HashSet<String> =
        walk::relevant_children(&cold_path, cold_rules)?.into_iter().collect();
    let index_children: Vec<String> = index_dir
        .map(|d| d.iterdir().map(entry_name).collect())
        .unwrap_or_default();

    // Hot only.
    for name in sorted_diff(&hot_children, &cold_children) {
        let child_rel = join(rel, &name);
        let child_path = hot_path.join(&name);
        let child_rules = child_rules_for(&child_path, hot_rules)?;
        let (subtree, size) = hash_subtree(&child_path, &child_rules, progress)?;
        let idx_here = index_dir.and_then(|d| d.get(&name));
        match idx_here {
            None => out.push(Change::Added { path: child_rel, payload: subtree, size }),
            Some(existing) if existing == subtree => {
                out.push(Change::Lost { path: child_rel, size })
            }
            Some(_) => out.push(Change::ModifiedLost { path: child_rel, payload: subtree, size }),
        }
    }

    // Cold only.
    for name in sorted_diff(&cold_children, &hot_children) {
        let child_rel = join(rel, &name);
        let child_path = cold_path.join(&name);
        let child_rules = child_rules_for(&child_path, cold_rules)?;
        let idx_here = index_dir.and_then(|d| d.get(&name));
        match idx_here {
            None => {
                let meta = fs::metadata(&child_path)
                    .with_context(|| format!("stat'ing {}", child_path.display()))?;
                let size = if meta.is_dir() {
                    walk::total_relevant_size(&child_path, &child_rules)?
                } else {
                    meta.len()
                };
                progress.inc(size);
                out.push(Change::Appeared { path: child_rel });
            }
            Some(existing) => {
                let (subtree, _size) = hash_subtree(&child_path, &child_rules, progress)?;
                if existing == subtree {
                    out.push(Change::Removed {
                        path: child_rel,
                        payload: existing,
                        has_been: Vec::new(),
                    });
                } else {
                    out.push(Change::RemovedCorrupted { path: child_rel, payload: existing });
                }
            }
        }
    }

    // Index only.
    let hot_or_cold: HashSet<&str> = hot_children
        .iter()
        .chain(cold_children.iter())
        .map(String::as_str)
        .collect();
    for name in &index_children {
        if !hot_or_cold.contains(name.as_str()) {
            out.push(Change::RemovedLost { path: join(rel, name) });
        }
    }

    // Common children: recurse.
    let mut common: Vec<&String> = hot_children.intersection(&cold_children).collect();
    common.sort();
    for name in common.drain(..) {
        let child_rel = join(rel, name);
        let hot_child_path = hot_path.join(name);
        let cold_child_path = cold_path.join(name);
        let next_hot_rules = child_rules_for(&hot_child_path, hot_rules)?;
        let next_cold_rules = child_rules_for(&cold_child_path, cold_rules)?;
        let child_index_value = index_dir.and_then(|d| d.get(name));
        walk_trees_at(
            &child_rel,
            child_index_value,
            hot_root,
            cold_root,
            &next_hot_rules,
            &next_cold_rules,
            progress,
            out,
        )?;
    }

    Ok(())
}

fn entry_name(e: crate::index::Entry<'_>) -> String {
    match e {
        crate::index::Entry::Dir(name, _) => name.to_string(),
        crate::index::Entry::File(name, _) => name.to_string(),
    }
}

fn sorted_diff(a: &HashSet<String>, b: &HashSet<String>) -> Vec<String> {
    let mut v: Vec<String> = a.difference(b).cloned().collect();
    v.sort();
    v
}

fn child_rules_for(path: &Path, parent_rules: &IgnoreChain) -> Result<IgnoreChain> {
    if path.is_dir() {
        walk::child_rules(path, parent_rules)
    } else {
        Ok(parent_rules.clone())
    }
}

/// Recursively hash a file or directory into the `IndexValue` shape the
/// index would store for it, plus its total byte size.
fn hash_subtree(path: &Path, rules: &IgnoreChain, progress: &dyn Progress) -> Result<(IndexValue, u64)> {
    let meta = fs::metadata(path).with_context(|| format!("stat'ing {}", path.display()))?;
    if meta.is_file() {
        let checksum = checksum::hash_file(path, progress);
        return Ok((IndexValue::File(checksum), meta.len()));
    }
    if !meta.is_dir() {
        anyhow::bail!("unsupported file type at {}", path.display());
    }

    let mut node = Index::default();
    let mut total = 0u64;
    for name in walk::relevant_children(path, rules)? {
        let child_path = path.join(&name);
        let child_rules = child_rules_for(&child_path, rules)?;
        let (value, size) = hash_subtree(&child_path, &child_rules, progress)?;
        node.set(&name, value)?;
        total += size;
    }
    Ok((IndexValue::Dir(node), total))
}

/// The file-case truth table (§4.F), recast from the closed H/C/I
/// taxonomy (§4.E) rather than the ambiguous equal/differ columns the
/// prose table uses — the two disagree only in cases a deterministic
/// hash can never actually produce.
fn classify_file_case(
    rel: &str,
    idx: Option<&Checksum>,
    hot_hash: &Checksum,
    cold_hash: &Checksum,
    equal: bool,
    size: u64,
) -> Option<Change> {
    let path = rel.to_string();
    match idx {
        None => Some(if equal {
            Change::AddedCopied { path, checksum: hot_hash.clone() }
        } else {
            Change::AddedAppeared { path, checksum: hot_hash.clone(), size }
        }),
        Some(idx) => {
            let hot_eq_idx = hot_hash == idx;
            let cold_eq_idx = cold_hash == idx;
            match (hot_eq_idx, cold_eq_idx, equal) {
                (true, true, true) => None,
                (true, false, false) => Some(Change::Corrupted { path, size }),
                (false, true, false) => {
                    Some(Change::Modified { path, checksum: hot_hash.clone(), size })
                }
                (false, false, true) => {
                    Some(Change::ModifiedCopied { path, checksum: hot_hash.clone() })
                }
                (false, false, false) => {
                    Some(Change::ModifiedCorrupted { path, checksum: hot_hash.clone(), size })
                }
                // Unreachable without a hash collision: byte-equality is
                // authoritative and implies hot/cold agree with the index
                // identically, so these combinations never arise in practice.
                _ => None,
            }
        }
    }
}
