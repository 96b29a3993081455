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
//! The persisted checksum index (§4.D): a recursive tree of file leaves and
//! directory nodes, with a small textual on-disk format rooted at
//! `<cold_root>/index.txt`.

use crate::checksum::Checksum;
use crate::error::DintactError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

const FILE_NAME: &str = "index.txt";
const HEADER_PREFIX: &str = "# dintact index ";

#[derive(Debug, Serialize, Deserialize)]
struct IndexHeader {
    version: u32,
    algorithm: String,
    coding: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_at: Option<String>,
}

/// A value that can live at a path in the index: either a file's checksum
/// or a whole sub-Index (used when a change's payload is a hashed subtree).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexValue {
    File(Checksum),
    Dir(Index),
}

/// One node of the index tree. The root node represents the whole index;
/// `files`/`dirs` are keyed by single path component (never by a full
/// relative path). `BTreeMap` gives deterministic iteration and on-disk
/// ordering; callers must not otherwise depend on enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    pub files: BTreeMap<String, Checksum>,
    pub dirs: BTreeMap<String, Index>,
}

/// A directory's immediate child, as returned by [`Index::iterdir`].
pub enum Entry<'a> {
    Dir(&'a str, &'a Index),
    File(&'a str, &'a Checksum),
}

fn split(path: &str) -> Vec<&str> {
    path.split('/').filter(|c| !c.is_empty()).collect()
}

impl Index {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.dirs.is_empty()
    }

    /// Total count of file leaves anywhere in this subtree.
    pub fn len(&self) -> usize {
        self.files.len() + self.dirs.values().map(Index::len).sum::<usize>()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }

    fn lookup(&self, path: &str) -> Option<IndexValue> {
        let comps = split(path);
        if comps.is_empty() {
            return Some(IndexValue::Dir(self.clone()));
        }
        let mut node = self;
        for comp in &comps[..comps.len() - 1] {
            node = node.dirs.get(*comp)?;
        }
        let name = comps[comps.len() - 1];
        if let Some(c) = node.files.get(name) {
            return Some(IndexValue::File(c.clone()));
        }
        node.dirs.get(name).map(|d| IndexValue::Dir(d.clone()))
    }

    /// Look up the value at `path` without cloning the whole subtree.
    pub fn get(&self, path: &str) -> Option<IndexValue> {
        self.lookup(path)
    }

    /// Insert or overwrite the value at `path`, creating intermediate
    /// directory nodes as needed. Errors if a component collides with a
    /// node of the other kind (§4.D collisions).
    pub fn set(&mut self, path: &str, value: IndexValue) -> Result<()> {
        let comps = split(path);
        anyhow::ensure!(!comps.is_empty(), "cannot set the index root itself");
        let mut node = self;
        for comp in &comps[..comps.len() - 1] {
            if node.files.contains_key(*comp) {
                return Err(DintactError::NameCollision { path: path.into() }.into());
            }
            node = node.dirs.entry((*comp).to_string()).or_default();
        }
        let name = comps[comps.len() - 1];
        match value {
            IndexValue::File(checksum) => {
                if node.dirs.contains_key(name) {
                    return Err(DintactError::NameCollision { path: path.into() }.into());
                }
                node.files.insert(name.to_string(), checksum);
            }
            IndexValue::Dir(sub) => {
                if node.files.contains_key(name) {
                    return Err(DintactError::NameCollision { path: path.into() }.into());
                }
                node.dirs.insert(name.to_string(), sub);
            }
        }
        Ok(())
    }

    /// Remove whatever lives at `path` (file leaf or whole subtree),
    /// pruning any directory node left empty by the removal.
    pub fn delete(&mut self, path: &str) -> Result<()> {
        let comps = split(path);
        anyhow::ensure!(!comps.is_empty(), "cannot delete the index root itself");
        self.delete_rec(&comps)?;
        Ok(())
    }

    fn delete_rec(&mut self, comps: &[&str]) -> Result<()> {
        if comps.len() == 1 {
            let name = comps[0];
            if self.files.remove(name).is_some() || self.dirs.remove(name).is_some() {
                return Ok(());
            }
            anyhow::bail!("path not present in index: '{name}'");
        }
        let name = comps[0];
        let child = self
            .dirs
            .get_mut(name)
            .ok_or_else(|| anyhow::anyhow!("path not present in index: '{name}'"))?;
        child.delete_rec(&comps[1..])?;
        if child.is_empty() {
            self.dirs.remove(name);
        }
        Ok(())
    }

    /// Recursive leaf-path enumeration: directories first, then files,
    /// at every level. Consumers must not depend on this order.
    pub fn iter(&self) -> Vec<(String, Checksum)> {
        let mut out = Vec::new();
        self.iter_into("", &mut out);
        out
    }

    fn iter_into(&self, prefix: &str, out: &mut Vec<(String, Checksum)>) {
        for (name, sub) in &self.dirs {
            sub.iter_into(&join(prefix, name), out);
        }
        for (name, checksum) in &self.files {
            out.push((join(prefix, name), checksum.clone()));
        }
    }

    /// Immediate children only, directories then files.
    pub fn iterdir(&self) -> Vec<Entry<'_>> {
        let mut out = Vec::new();
        for (name, sub) in &self.dirs {
            out.push(Entry::Dir(name, sub));
        }
        for (name, checksum) in &self.files {
            out.push(Entry::File(name, checksum));
        }
        out
    }

    /// Map from checksum to every path carrying it, computed on demand.
    /// Used only by duplicate reporting (§4.G).
    pub fn reverse_map(&self) -> HashMap<Checksum, Vec<String>> {
        let mut map: HashMap<Checksum, Vec<String>> = HashMap::new();
        for (path, checksum) in self.iter() {
            map.entry(checksum).or_default().push(path);
        }
        map
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

/// Load `<cold_root>/index.txt`, creating an empty in-memory index if the
/// file is absent. Rejects a present file with a missing/malformed header
/// or an incompatible version, algorithm, or coding (§4.D, §7).
pub fn load(cold_root: &Path) -> Result<Index> {
    let path = cold_root.join(FILE_NAME);
    if !path.exists() {
        return Ok(Index::default());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("reading index file {}", path.display()))?;
    let mut lines = content.lines();

    let header_line = lines
        .next()
        .ok_or_else(|| DintactError::IndexHeaderMissing { path: path.clone() })?;
    let json = header_line
        .strip_prefix(HEADER_PREFIX)
        .ok_or_else(|| DintactError::IndexHeaderMissing { path: path.clone() })?;
    let header: IndexHeader = serde_json::from_str(json)
        .with_context(|| format!("malformed index header in {}", path.display()))?;

    if header.version != 1 {
        return Err(DintactError::IndexIncompatible {
            path: path.clone(),
            reason: format!("version {} != 1", header.version),
        }
        .into());
    }
    if header.algorithm != "XXH128" {
        return Err(DintactError::IndexIncompatible {
            path: path.clone(),
            reason: format!("algorithm '{}' != XXH128", header.algorithm),
        }
        .into());
    }
    if header.coding != "utf8" {
        return Err(DintactError::IndexIncompatible {
            path,
            reason: format!("coding '{}' != utf8", header.coding),
        }
        .into());
    }

    let mut root = Index::default();
    for line in lines {
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let (checksum_str, rel_path) = line
            .split_once("  ")
            .with_context(|| format!("malformed index line: '{line}'"))?;
        let checksum: Checksum = checksum_str.parse()?;
        root.set(rel_path, IndexValue::File(checksum))?;
    }
    Ok(root)
}

/// Rewrite `<cold_root>/index.txt` from the in-memory state, refreshing
/// `created_at`. The only state ever persisted besides the index itself
/// is this one file.
pub fn store(cold_root: &Path, index: &Index) -> Result<()> {
    let path = cold_root.join(FILE_NAME);
    let header = IndexHeader {
        version: 1,
        algorithm: "XXH128".to_string(),
        coding: "utf8".to_string(),
        created_at: Some(crate::fsutil::iso8601(crate::fsutil::now())),
    };

    let mut body = index.iter();
    body.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out = String::new();
    out.push_str(HEADER_PREFIX);
    out.push_str(&serde_json::to_string(&header)?);
    out.push('\n');
    for (path, checksum) in body {
        out.push_str(checksum.as_str());
        out.push_str("  ");
        out.push_str(&path);
        out.push('\n');
    }

    fs::write(&path, out).with_context(|| format!("writing index file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn checksum(tag: &str) -> Checksum {
        format!("{:0<32}", tag).parse().unwrap()
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = TempDir::new().unwrap();
        let idx = load(dir.path()).unwrap();
        assert_eq!(idx.len(), 0);
        assert!(idx.is_empty());
    }

    #[test]
    fn set_get_contains_roundtrip() {
        let mut idx = Index::default();
        idx.set("a/b/c.txt", IndexValue::File(checksum("aa"))).unwrap();
        assert!(idx.contains("a/b/c.txt"));
        assert!(idx.contains("a/b"));
        assert!(idx.contains("a"));
        assert!(!idx.contains("a/b/d.txt"));
        assert_eq!(idx.len(), 1);
    }

    #[test]
    fn set_file_over_dir_is_a_collision() {
        let mut idx = Index::default();
        idx.set("a/b.txt", IndexValue::File(checksum("aa"))).unwrap();
        let err = idx.set("a", IndexValue::File(checksum("bb")));
        assert!(err.is_err());
    }

    #[test]
    fn set_dir_over_file_is_a_collision() {
        let mut idx = Index::default();
        idx.set("a", IndexValue::File(checksum("aa"))).unwrap();
        let err = idx.set("a/b.txt", IndexValue::File(checksum("bb")));
        assert!(err.is_err());
    }

    #[test]
    fn delete_prunes_empty_directory_nodes() {
        let mut idx = Index::default();
        idx.set("a/b/c.txt", IndexValue::File(checksum("aa"))).unwrap();
        idx.delete("a/b/c.txt").unwrap();
        assert!(!idx.contains("a/b/c.txt"));
        assert!(!idx.contains("a/b"));
        assert!(!idx.contains("a"));
        assert!(idx.is_empty());
    }

    #[test]
    fn delete_leaves_sibling_intact() {
        let mut idx = Index::default();
        idx.set("a/b/c.txt", IndexValue::File(checksum("aa"))).unwrap();
        idx.set("a/d.txt", IndexValue::File(checksum("bb"))).unwrap();
        idx.delete("a/b/c.txt").unwrap();
        assert!(!idx.contains("a/b"));
        assert!(idx.contains("a/d.txt"));
        assert!(idx.contains("a"));
    }

    #[test]
    fn delete_missing_path_errors() {
        let mut idx = Index::default();
        assert!(idx.delete("nope.txt").is_err());
    }

    #[test]
    fn iter_enumerates_all_leaves() {
        let mut idx = Index::default();
        idx.set("a/b.txt", IndexValue::File(checksum("aa"))).unwrap();
        idx.set("c.txt", IndexValue::File(checksum("bb"))).unwrap();
        let mut paths: Vec<String> = idx.iter().into_iter().map(|(p, _)| p).collect();
        paths.sort();
        assert_eq!(paths, vec!["a/b.txt".to_string(), "c.txt".to_string()]);
    }

    #[test]
    fn store_then_load_roundtrips() {
        let dir = TempDir::new().unwrap();
        let mut idx = Index::default();
        idx.set("a/b.txt", IndexValue::File(checksum("aa"))).unwrap();
        idx.set("c.txt", IndexValue::File(checksum("bb"))).unwrap();
        store(dir.path(), &idx).unwrap();

        let loaded = load(dir.path()).unwrap();
        assert_eq!(loaded, idx);
    }

    #[test]
    fn load_rejects_missing_header() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(FILE_NAME), "not a header\n").unwrap();
        assert!(load(dir.path()).is_err());
    }

    #[test]
    fn load_rejects_incompatible_version() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(FILE_NAME),
            "# dintact index {\"version\":2,\"algorithm\":\"XXH128\",\"coding\":\"utf8\"}\n",
        )
        .unwrap();
        assert!(load(dir.path()).is_err());
    }

    #[test]
    fn load_skips_blank_and_comment_lines() {
        let dir = TempDir::new().unwrap();
        let body = format!(
            "# dintact index {{\"version\":1,\"algorithm\":\"XXH128\",\"coding\":\"utf8\"}}\n\n# a comment\n{}  a.txt\n",
            checksum("aa")
        );
        fs::write(dir.path().join(FILE_NAME), body).unwrap();
        let idx = load(dir.path()).unwrap();
        assert!(idx.contains("a.txt"));
        assert_eq!(idx.len(), 1);
    }

    #[test]
    fn reverse_map_groups_duplicate_checksums() {
        let mut idx = Index::default();
        idx.set("a.txt", IndexValue::File(checksum("aa"))).unwrap();
        idx.set("b/c.txt", IndexValue::File(checksum("aa"))).unwrap();
        idx.set("d.txt", IndexValue::File(checksum("bb"))).unwrap();
        let map = idx.reverse_map();
        assert_eq!(map.get(&checksum("aa")).unwrap().len(), 2);
        assert_eq!(map.get(&checksum("bb")).unwrap().len(), 1);
    }
}
