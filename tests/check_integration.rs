// Integration coverage for the `check` subcommand (§6, §8 scenario 6):
// re-hashing a persisted index against a cold tree end to end.

use dintact::check::check;
use dintact::error::DintactError;
use dintact::index::{Index, IndexValue};
use std::fs;
use tempfile::TempDir;

#[test]
fn intact_tree_reports_ok() {
    let cold = TempDir::new().unwrap();
    fs::write(cold.path().join("a.txt"), "hello").unwrap();

    let mut idx = Index::default();
    idx.set("a.txt", IndexValue::File(dintact::checksum::hash_file(
        &cold.path().join("a.txt"),
        &dintact::progress::NoopProgress,
    )))
    .unwrap();
    dintact::index::store(cold.path(), &idx).unwrap();

    assert!(check(cold.path()).unwrap());
}

#[test]
fn bit_rot_is_detected() {
    let cold = TempDir::new().unwrap();
    fs::write(cold.path().join("a.txt"), "X").unwrap();
    let good_hash = dintact::checksum::hash_file(&cold.path().join("a.txt"), &dintact::progress::NoopProgress);

    let mut idx = Index::default();
    idx.set("a.txt", IndexValue::File(good_hash)).unwrap();
    dintact::index::store(cold.path(), &idx).unwrap();

    // Corrupt the cold copy after the index was recorded.
    fs::write(cold.path().join("a.txt"), "Y").unwrap();

    assert!(!check(cold.path()).unwrap());
}

#[test]
fn unindexed_file_is_detected() {
    let cold = TempDir::new().unwrap();
    let idx = Index::default();
    dintact::index::store(cold.path(), &idx).unwrap();
    fs::write(cold.path().join("surprise.txt"), "noise").unwrap();

    assert!(!check(cold.path()).unwrap());
}

#[test]
fn missing_cold_root_is_an_error() {
    let missing = TempDir::new().unwrap().path().join("does-not-exist");
    let err = check(&missing).unwrap_err().downcast::<DintactError>().unwrap();
    assert!(matches!(err, DintactError::RootMissing { which: "cold", .. }));
}
