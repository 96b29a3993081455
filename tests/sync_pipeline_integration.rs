// End-to-end coverage of the non-interactive half of the `sync` pipeline
// (§4.F/§4.G/§4.H): diff, post-process, apply, persist — driven directly
// rather than through the interactive confirmation wrapper in `apply::sync`,
// which reads from stdin and isn't something an automated test should block
// on.

use dintact::change::Change;
use dintact::index::{Index, IndexValue};
use dintact::progress::NoopProgress;
use dintact::{diff, index as idx_mod, postprocess};
use std::fs;
use tempfile::TempDir;

fn run_full_cycle(hot: &std::path::Path, cold: &std::path::Path, index: &Index) -> (Vec<Change>, Index) {
    let mut changes = diff::walk_trees(hot, cold, index, &NoopProgress).unwrap();
    postprocess::ignore_index(&mut changes);
    let changes = postprocess::find_moveds(changes);
    let mut changes = postprocess::find_deduplications(changes, index);
    changes.sort_by(|a, b| a.path().cmp(b.path()));

    let mut new_index = index.clone();
    for mut change in changes.clone() {
        change.apply(hot, cold, &mut new_index, &NoopProgress).unwrap();
    }
    (changes, new_index)
}

#[test]
fn pure_addition_is_copied_and_indexed() {
    let hot = TempDir::new().unwrap();
    let cold = TempDir::new().unwrap();
    fs::write(hot.path().join("a.txt"), "hello").unwrap();
    let index = Index::default();

    let (changes, new_index) = run_full_cycle(hot.path(), cold.path(), &index);
    assert_eq!(changes.len(), 1);
    assert!(matches!(&changes[0], Change::Added { path, .. } if path == "a.txt"));
    assert_eq!(fs::read_to_string(cold.path().join("a.txt")).unwrap(), "hello");
    assert!(new_index.contains("a.txt"));
}

#[test]
fn silent_corruption_is_restored_from_hot() {
    let hot = TempDir::new().unwrap();
    let cold = TempDir::new().unwrap();
    fs::write(hot.path().join("a.txt"), "X").unwrap();
    fs::write(cold.path().join("a.txt"), "Y").unwrap();
    let mut index = Index::default();
    index
        .set(
            "a.txt",
            IndexValue::File(dintact::checksum::hash_file(&hot.path().join("a.txt"), &NoopProgress)),
        )
        .unwrap();

    let (changes, _) = run_full_cycle(hot.path(), cold.path(), &index);
    assert_eq!(changes.len(), 1);
    assert!(matches!(&changes[0], Change::Corrupted { path, .. } if path == "a.txt"));
    assert_eq!(fs::read_to_string(cold.path().join("a.txt")).unwrap(), "X");
}

#[test]
fn move_within_cold_is_renamed_not_recopied() {
    let hot = TempDir::new().unwrap();
    let cold = TempDir::new().unwrap();
    let bytes = vec![7u8; 1 << 16];
    fs::create_dir_all(hot.path().join("new")).unwrap();
    fs::write(hot.path().join("new/f.bin"), &bytes).unwrap();
    fs::create_dir_all(cold.path().join("old")).unwrap();
    fs::write(cold.path().join("old/f.bin"), &bytes).unwrap();
    let mut index = Index::default();
    index
        .set(
            "old/f.bin",
            IndexValue::File(dintact::checksum::hash_file(&cold.path().join("old/f.bin"), &NoopProgress)),
        )
        .unwrap();

    let (changes, new_index) = run_full_cycle(hot.path(), cold.path(), &index);
    assert_eq!(changes.len(), 1);
    assert!(matches!(&changes[0], Change::Moved { path, .. } if path == "new/f.bin"));
    assert!(cold.path().join("new/f.bin").exists());
    assert!(!cold.path().join("old/f.bin").exists());
    assert!(new_index.contains("new/f.bin"));
    assert!(!new_index.contains("old/f.bin"));
}

#[test]
fn appeared_noise_is_removed_from_cold() {
    let hot = TempDir::new().unwrap();
    let cold = TempDir::new().unwrap();
    fs::write(cold.path().join("junk.txt"), "noise").unwrap();
    let index = Index::default();

    let (changes, _) = run_full_cycle(hot.path(), cold.path(), &index);
    assert_eq!(changes.len(), 1);
    assert!(matches!(&changes[0], Change::Appeared { path } if path == "junk.txt"));
    assert!(!cold.path().join("junk.txt").exists());
}

#[test]
fn removed_lost_cleans_the_index_only() {
    let hot = TempDir::new().unwrap();
    let cold = TempDir::new().unwrap();
    let mut index = Index::default();
    index
        .set("ghost.txt", IndexValue::File("a".repeat(32).parse().unwrap()))
        .unwrap();

    let (changes, new_index) = run_full_cycle(hot.path(), cold.path(), &index);
    assert_eq!(changes.len(), 1);
    assert!(matches!(&changes[0], Change::RemovedLost { path } if path == "ghost.txt"));
    assert!(new_index.is_empty());
}

#[test]
fn full_cycle_persists_and_reloads_identically() {
    let hot = TempDir::new().unwrap();
    let cold = TempDir::new().unwrap();
    fs::write(hot.path().join("a.txt"), "content").unwrap();
    fs::create_dir_all(hot.path().join("dir")).unwrap();
    fs::write(hot.path().join("dir/b.txt"), "more content").unwrap();
    let index = Index::default();

    let (_, new_index) = run_full_cycle(hot.path(), cold.path(), &index);
    idx_mod::store(cold.path(), &new_index).unwrap();
    let reloaded = idx_mod::load(cold.path()).unwrap();
    assert_eq!(reloaded, new_index);
    assert_eq!(reloaded.len(), 2);
}
