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
//! The closed change taxonomy (§4.E): thirteen diff-time variants plus the
//! `Moved` variant synthesized by post-processing. Every variant knows
//! how to apply itself against the filesystem and the index.

use crate::checksum::Checksum;
use crate::error::DintactError;
use crate::fsutil;
use crate::index::{Index, IndexValue};
use crate::progress::Progress;
use anyhow::Result;
use std::mem::discriminant;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum Change {
    AddedCopied { path: String, checksum: Checksum },
    ModifiedCopied { path: String, checksum: Checksum },
    Modified { path: String, checksum: Checksum, size: u64 },
    Corrupted { path: String, size: u64 },
    ModifiedCorrupted { path: String, checksum: Checksum, size: u64 },
    AddedAppeared { path: String, checksum: Checksum, size: u64 },
    Added { path: String, payload: IndexValue, size: u64 },
    ModifiedLost { path: String, payload: IndexValue, size: u64 },
    Lost { path: String, size: u64 },
    Removed { path: String, payload: IndexValue, has_been: Vec<String> },
    RemovedCorrupted { path: String, payload: IndexValue },
    Appeared { path: String },
    RemovedLost { path: String },
    Moved { path: String, payload: IndexValue, removed: Box<Change> },
}

impl Change {
    /// Identity anchor used for sorting and for the prompt/output layer.
    /// `Moved`'s identity path is its destination.
    pub fn path(&self) -> &str {
        match self {
            Change::AddedCopied { path, .. }
            | Change::ModifiedCopied { path, .. }
            | Change::Modified { path, .. }
            | Change::Corrupted { path, .. }
            | Change::ModifiedCorrupted { path, .. }
            | Change::AddedAppeared { path, .. }
            | Change::Added { path, .. }
            | Change::ModifiedLost { path, .. }
            | Change::Lost { path, .. }
            | Change::Removed { path, .. }
            | Change::RemovedCorrupted { path, .. }
            | Change::Appeared { path }
            | Change::RemovedLost { path }
            | Change::Moved { path, .. } => path,
        }
    }

    /// Bytes this change will move during apply, used to size the
    /// progress bar (§4.H step 9). Index-only bookkeeping is free.
    pub fn size(&self) -> u64 {
        match self {
            Change::Modified { size, .. }
            | Change::Corrupted { size, .. }
            | Change::ModifiedCorrupted { size, .. }
            | Change::AddedAppeared { size, .. }
            | Change::Added { size, .. }
            | Change::ModifiedLost { size, .. }
            | Change::Lost { size, .. } => *size,
            _ => 0,
        }
    }

    /// A short human-readable label, e.g. for the per-change prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Change::AddedCopied { .. } => "added, already copied",
            Change::ModifiedCopied { .. } => "modified identically on both sides",
            Change::Modified { .. } => "modified",
            Change::Corrupted { .. } => "corrupted on cold",
            Change::ModifiedCorrupted { .. } => "modified and corrupted",
            Change::AddedAppeared { .. } => "added, but cold already had different content",
            Change::Added { .. } => "added",
            Change::ModifiedLost { .. } => "modified, cold copy missing",
            Change::Lost { .. } => "missing from cold",
            Change::Removed { .. } => "removed",
            Change::RemovedCorrupted { .. } => "removed, cold copy was already corrupted",
            Change::Appeared { .. } => "unindexed file on cold",
            Change::RemovedLost { .. } => "stale index entry",
            Change::Moved { .. } => "moved",
        }
    }

    /// Whether two changes share a variant (ignoring payload) — used by
    /// `find_moveds`/deduplication bucketing and by `Change`'s identity.
    fn same_kind(&self, other: &Change) -> bool {
        discriminant(self) == discriminant(other)
    }

    pub fn apply(
        &mut self,
        hot_root: &Path,
        cold_root: &Path,
        index: &mut Index,
        progress: &dyn Progress,
    ) -> Result<()> {
        let result = self.apply_inner(hot_root, cold_root, index);
        progress.inc(self.size());
        result
    }

    fn apply_inner(&mut self, hot_root: &Path, cold_root: &Path, index: &mut Index) -> Result<()> {
        match self {
            Change::AddedCopied { path, checksum } => {
                index.set(path, IndexValue::File(checksum.clone()))?;
            }
            Change::ModifiedCopied { path, checksum } => {
                index.set(path, IndexValue::File(checksum.clone()))?;
            }
            Change::Modified { path, checksum, .. } => {
                rm(cold_root, path)?;
                cp(hot_root, cold_root, path)?;
                index.set(path, IndexValue::File(checksum.clone()))?;
            }
            Change::Corrupted { path, .. } => {
                rm(cold_root, path)?;
                cp(hot_root, cold_root, path)?;
            }
            Change::ModifiedCorrupted { path, checksum, .. } => {
                rm(cold_root, path)?;
                cp(hot_root, cold_root, path)?;
                index.set(path, IndexValue::File(checksum.clone()))?;
            }
            Change::AddedAppeared { path, checksum, .. } => {
                rm(cold_root, path)?;
                cp(hot_root, cold_root, path)?;
                index.set(path, IndexValue::File(checksum.clone()))?;
            }
            Change::Added { path, payload, .. } => {
                cp(hot_root, cold_root, path)?;
                index.set(path, payload.clone())?;
            }
            Change::ModifiedLost { path, payload, .. } => {
                cp(hot_root, cold_root, path)?;
                index.set(path, payload.clone())?;
            }
            Change::Lost { path, .. } => {
                cp(hot_root, cold_root, path)?;
            }
            Change::Removed { path, .. } => {
                rm(cold_root, path)?;
                index.delete(path)?;
            }
            Change::RemovedCorrupted { path, .. } => {
                rm(cold_root, path)?;
                index.delete(path)?;
            }
            Change::Appeared { path } => {
                rm(cold_root, path)?;
            }
            Change::RemovedLost { path } => {
                index.delete(path)?;
            }
            Change::Moved { path: dst, payload, removed } => {
                let src = removed.path().to_string();
                let cold_src = cold_root.join(&src);
                let cold_dst = cold_root.join(dst.as_str());
                fsutil::mv(&cold_src, &cold_dst).map_err(|e| DintactError::ApplyFailure {
                    path: cold_dst.clone(),
                    reason: e.to_string(),
                })?;
                index.set(dst, payload.clone())?;
                index.delete(&src)?;
            }
        }
        Ok(())
    }
}

fn rm(cold_root: &Path, path: &str) -> Result<()> {
    let target = cold_root.join(path);
    fsutil::rm(&target).map_err(|e| {
        DintactError::ApplyFailure {
            path: target.clone(),
            reason: e.to_string(),
        }
        .into()
    })
}

fn cp(hot_root: &Path, cold_root: &Path, path: &str) -> Result<()> {
    let source = hot_root.join(path);
    let target = cold_root.join(path);
    fsutil::cp(&source, &target).map_err(|e| {
        DintactError::ApplyFailure {
            path: target.clone(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Pair up a `Removed` and an `Added` sharing a checksum into a `Moved`.
/// Panics if `removed` is not a `Change::Removed` — callers (post-
/// processing) only ever pass matched pairs from the raw diff output.
pub fn synthesize_moved(added: Change, removed: Change) -> Change {
    debug_assert!(matches!(removed, Change::Removed { .. }));
    let (path, payload) = match added {
        Change::Added { path, payload, .. } => (path, payload),
        other => panic!("synthesize_moved called with a non-Added change: {other:?}"),
    };
    Change::Moved {
        path,
        payload,
        removed: Box::new(removed),
    }
}

impl PartialEq for Change {
    fn eq(&self, other: &Self) -> bool {
        self.same_kind(other) && self.path() == other.path()
    }
}
impl Eq for Change {}

impl std::hash::Hash for Change {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        discriminant(self).hash(state);
        self.path().hash(state);
    }
}
