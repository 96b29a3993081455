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
//! `.gitignore`-style ignore rules, each scoped to the directory it was
//! found in (§4.B). Rules accumulate additively as the walker descends;
//! siblings never see each other's accumulated rules.

use anyhow::{Context, Result};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::{Path, PathBuf};

/// A compiled `.gitignore` bound to the directory it was read from.
#[derive(Clone)]
pub struct IgnoreRule {
    root: PathBuf,
    matcher: Gitignore,
}

impl IgnoreRule {
    /// Load `<dir>/.gitignore` if present. Returns `None` if there is no
    /// such file (a directory with no `.gitignore` contributes no rule).
    pub fn load(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(".gitignore");
        if !path.exists() {
            return Ok(None);
        }
        let mut builder = GitignoreBuilder::new(dir);
        builder
            .add(&path)
            .map(Ok)
            .unwrap_or(Ok(()))
            .with_context(|| format!("failed to read {}", path.display()))?;
        let matcher = builder
            .build()
            .with_context(|| format!("failed to compile {}", path.display()))?;
        Ok(Some(IgnoreRule {
            root: dir.to_path_buf(),
            matcher,
        }))
    }
}

/// The accumulated rule stack active at some point in the walk. A clone is
/// cheap-ish (O(depth)) and is taken before descending into each child so
/// that siblings don't see each other's rules.
#[derive(Clone, Default)]
pub struct IgnoreChain(Vec<IgnoreRule>);

impl IgnoreChain {
    pub fn new() -> Self {
        IgnoreChain(Vec::new())
    }

    /// Return a chain with `rule` appended, leaving `self` untouched.
    pub fn appended(&self, rule: IgnoreRule) -> Self {
        let mut next = self.0.clone();
        next.push(rule);
        IgnoreChain(next)
    }

    /// Whether `path` is ignored. The last rule (in accumulation order)
    /// whose root contains `path` and which matches it wins; negation
    /// (`!pattern`) toggles inclusion back on.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        let mut ignored = false;
        for rule in &self.0 {
            if !path.starts_with(&rule.root) {
                continue;
            }
            match rule.matcher.matched(path, is_dir) {
                ignore::Match::None => {}
                ignore::Match::Ignore => ignored = true,
                ignore::Match::Whitelist(_) => ignored = false,
            }
        }
        ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn no_gitignore_means_nothing_ignored() {
        let dir = TempDir::new().unwrap();
        let chain = IgnoreChain::new();
        assert!(!chain.is_ignored(&dir.path().join("a.txt"), false));
    }

    #[test]
    fn simple_pattern_ignores_matching_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".gitignore"), "*.log\n").unwrap();
        let rule = IgnoreRule::load(dir.path()).unwrap().unwrap();
        let chain = IgnoreChain::new().appended(rule);
        assert!(chain.is_ignored(&dir.path().join("debug.log"), false));
        assert!(!chain.is_ignored(&dir.path().join("debug.txt"), false));
    }

    #[test]
    fn negation_overrides_an_earlier_ignore() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".gitignore"), "*.log\n!keep.log\n").unwrap();
        let rule = IgnoreRule::load(dir.path()).unwrap().unwrap();
        let chain = IgnoreChain::new().appended(rule);
        assert!(chain.is_ignored(&dir.path().join("debug.log"), false));
        assert!(!chain.is_ignored(&dir.path().join("keep.log"), false));
    }

    #[test]
    fn rule_does_not_apply_outside_its_root() {
        let outer = TempDir::new().unwrap();
        let inner = outer.path().join("inner");
        fs::create_dir(&inner).unwrap();
        fs::write(inner.join(".gitignore"), "*.log\n").unwrap();
        let rule = IgnoreRule::load(&inner).unwrap().unwrap();
        let chain = IgnoreChain::new().appended(rule);
        // A path outside `inner` must not be affected by inner's rule.
        assert!(!chain.is_ignored(&outer.path().join("sibling.log"), false));
    }

    #[test]
    fn appended_chain_does_not_mutate_original() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".gitignore"), "*.log\n").unwrap();
        let rule = IgnoreRule::load(dir.path()).unwrap().unwrap();
        let base = IgnoreChain::new();
        let extended = base.appended(rule);
        assert!(!base.is_ignored(&dir.path().join("debug.log"), false));
        assert!(extended.is_ignored(&dir.path().join("debug.log"), false));
    }
}
