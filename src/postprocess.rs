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
//! Post-processing passes over the raw diff output (§4.G): suppress the
//! index's own file, fold matched Removed/Added pairs into Moved, and
//! annotate surviving Removed entries with known duplicates.

use crate::change::{self, Change};
use crate::index::{Index, IndexValue};
use std::collections::HashMap;

/// Drop `Appeared("index.txt")` — the index file sees itself as
/// unindexed cold-only content, which is never a real change.
pub fn ignore_index(changes: &mut Vec<Change>) {
    changes.retain(|c| !matches!(c, Change::Appeared { path } if path == "index.txt"));
}

fn payload_key(v: &IndexValue) -> String {
    match v {
        IndexValue::File(c) => c.as_str().to_string(),
        IndexValue::Dir(idx) => {
            let mut entries = idx.iter();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            entries
                .into_iter()
                .map(|(p, c)| format!("{p}:{c}"))
                .collect::<Vec<_>>()
                .join("|")
        }
    }
}

/// Fold a `Removed(p1, h)` / `Added(p2, h, _)` pair into `Moved(p2, h,
/// Removed(p1, h))` whenever exactly one of each shares a payload (by
/// content, not by path). Leaves changes untouched when multiplicity on
/// either side isn't exactly 1.
pub fn find_moveds(changes: Vec<Change>) -> Vec<Change> {
    let mut removed_by_key: HashMap<String, Vec<usize>> = HashMap::new();
    let mut added_by_key: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, c) in changes.iter().enumerate() {
        match c {
            Change::Removed { payload, .. } => {
                removed_by_key.entry(payload_key(payload)).or_default().push(i)
            }
            Change::Added { payload, .. } => {
                added_by_key.entry(payload_key(payload)).or_default().push(i)
            }
            _ => {}
        }
    }

    let mut pairs: Vec<(usize, usize)> = Vec::new();
    for (key, r_idxs) in &removed_by_key {
        if r_idxs.len() != 1 {
            continue;
        }
        if let Some(a_idxs) = added_by_key.get(key) {
            if a_idxs.len() == 1 {
                pairs.push((a_idxs[0], r_idxs[0]));
            }
        }
    }

    let mut slots: Vec<Option<Change>> = changes.into_iter().map(Some).collect();
    let mut moveds = Vec::new();
    for (a_i, r_i) in pairs {
        let added = slots[a_i].take().unwrap();
        let removed = slots[r_i].take().unwrap();
        moveds.push(change::synthesize_moved(added, removed));
    }

    let mut out: Vec<Change> = slots.into_iter().flatten().collect();
    out.extend(moveds);
    out
}

/// For each surviving `Removed(p, h)`, list the other paths in the
/// pre-sync index that already carry checksum `h` — purely informational,
/// shown to the user so they know the content isn't truly gone.
pub fn find_deduplications(mut changes: Vec<Change>, index: &Index) -> Vec<Change> {
    let reverse = index.reverse_map();
    for change in &mut changes {
        if let Change::Removed { path, payload, has_been } = change {
            if let IndexValue::File(checksum) = payload {
                if let Some(paths) = reverse.get(checksum) {
                    let others: Vec<String> =
                        paths.iter().filter(|p| p.as_str() != path.as_str()).cloned().collect();
                    if !others.is_empty() {
                        *has_been = others;
                    }
                }
            }
        }
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::Checksum;

    fn checksum(tag: &str) -> Checksum {
        format!("{:0<32}", tag).parse().unwrap()
    }

    #[test]
    fn ignore_index_drops_only_the_index_file() {
        let mut changes = vec![
            Change::Appeared { path: "index.txt".into() },
            Change::Appeared { path: "junk.txt".into() },
        ];
        ignore_index(&mut changes);
        assert_eq!(changes.len(), 1);
        assert!(matches!(&changes[0], Change::Appeared { path } if path == "junk.txt"));
    }

    #[test]
    fn find_moveds_folds_a_matched_pair() {
        let h = checksum("aa");
        let changes = vec![
            Change::Removed {
                path: "old/f.bin".into(),
                payload: IndexValue::File(h.clone()),
                has_been: vec![],
            },
            Change::Added {
                path: "new/f.bin".into(),
                payload: IndexValue::File(h),
                size: 1 << 20,
            },
        ];
        let out = find_moveds(changes);
        assert_eq!(out.len(), 1);
        assert!(matches!(&out[0], Change::Moved { path, .. } if path == "new/f.bin"));
    }

    #[test]
    fn find_moveds_ignores_ambiguous_multiplicity() {
        let h = checksum("aa");
        let changes = vec![
            Change::Removed {
                path: "old/a.bin".into(),
                payload: IndexValue::File(h.clone()),
                has_been: vec![],
            },
            Change::Removed {
                path: "old/b.bin".into(),
                payload: IndexValue::File(h.clone()),
                has_been: vec![],
            },
            Change::Added {
                path: "new/f.bin".into(),
                payload: IndexValue::File(h),
                size: 10,
            },
        ];
        let out = find_moveds(changes);
        assert_eq!(out.len(), 3);
        assert!(!out.iter().any(|c| matches!(c, Change::Moved { .. })));
    }

    #[test]
    fn find_deduplications_annotates_has_been() {
        let h = checksum("aa");
        let mut index = Index::default();
        index.set("a.txt", IndexValue::File(h.clone())).unwrap();
        index.set("b.txt", IndexValue::File(h.clone())).unwrap();

        let changes = vec![Change::Removed {
            path: "a.txt".into(),
            payload: IndexValue::File(h),
            has_been: vec![],
        }];
        let out = find_deduplications(changes, &index);
        match &out[0] {
            Change::Removed { has_been, .. } => assert_eq!(has_been, &vec!["b.txt".to_string()]),
            other => panic!("expected Removed, got {other:?}"),
        }
    }
}
