//! End-to-end reconciliation cycles against a real tree and a real store

use super::test_utils::{bump_clock, MockStore};
use filedex::hasher::{hash_bytes, Blake3Hasher};
use filedex::reconcile::{self, DEFAULT_HASH_SIZE_LIMIT};
use filedex::store::{InventoryStore, SledInventoryStore};
use filedex::types::Snapshot;
use std::fs;
use tempfile::TempDir;

fn open_store(dir: &TempDir) -> SledInventoryStore {
    SledInventoryStore::open(dir.path().join("inventory")).unwrap()
}

#[test]
fn test_first_run_creates_all_records() {
    let tree = TempDir::new().unwrap();
    let db = TempDir::new().unwrap();
    let store = open_store(&db);

    fs::write(tree.path().join("a.txt"), "alpha").unwrap();
    fs::write(tree.path().join("b.txt"), "beta").unwrap();

    let summary = reconcile::run(
        &store,
        tree.path().to_path_buf(),
        &Blake3Hasher,
        DEFAULT_HASH_SIZE_LIMIT,
    )
    .unwrap();

    assert_eq!(summary.scanned, 2);
    assert_eq!(summary.created, 2);
    assert_eq!(summary.updated, 0);
    assert_eq!(summary.deleted, 0);

    let records = store.load_all().unwrap();
    assert_eq!(records.len(), 2);
    let alpha = records.values().find(|r| r.name == "a.txt").unwrap();
    assert_eq!(alpha.size, 5);
    assert_eq!(alpha.hash.as_deref(), Some(hash_bytes(b"alpha").as_str()));
}

#[test]
fn test_second_run_is_idempotent() {
    let tree = TempDir::new().unwrap();
    let db = TempDir::new().unwrap();
    let store = open_store(&db);

    fs::write(tree.path().join("a.txt"), "alpha").unwrap();
    fs::create_dir(tree.path().join("sub")).unwrap();
    fs::write(tree.path().join("sub").join("b.txt"), "beta").unwrap();

    reconcile::run(
        &store,
        tree.path().to_path_buf(),
        &Blake3Hasher,
        DEFAULT_HASH_SIZE_LIMIT,
    )
    .unwrap();
    let second = reconcile::run(
        &store,
        tree.path().to_path_buf(),
        &Blake3Hasher,
        DEFAULT_HASH_SIZE_LIMIT,
    )
    .unwrap();

    assert_eq!(second.scanned, 2);
    assert_eq!(second.created, 0);
    assert_eq!(second.updated, 0);
    assert_eq!(second.deleted, 0);
}

#[test]
fn test_modified_file_is_updated_with_fresh_hash() {
    let tree = TempDir::new().unwrap();
    let db = TempDir::new().unwrap();
    let store = open_store(&db);
    let path = tree.path().join("a.txt");

    fs::write(&path, "first").unwrap();
    reconcile::run(
        &store,
        tree.path().to_path_buf(),
        &Blake3Hasher,
        DEFAULT_HASH_SIZE_LIMIT,
    )
    .unwrap();

    bump_clock();
    fs::write(&path, "second version").unwrap();
    let summary = reconcile::run(
        &store,
        tree.path().to_path_buf(),
        &Blake3Hasher,
        DEFAULT_HASH_SIZE_LIMIT,
    )
    .unwrap();

    assert_eq!(summary.updated, 1);
    assert_eq!(summary.created, 0);
    assert_eq!(summary.deleted, 0);

    let records = store.load_all().unwrap();
    let record = records.values().find(|r| r.name == "a.txt").unwrap();
    assert_eq!(record.size, 14);
    assert_eq!(
        record.hash.as_deref(),
        Some(hash_bytes(b"second version").as_str())
    );
}

#[test]
fn test_removed_file_is_deleted() {
    let tree = TempDir::new().unwrap();
    let db = TempDir::new().unwrap();
    let store = open_store(&db);

    fs::write(tree.path().join("keep.txt"), "keep").unwrap();
    fs::write(tree.path().join("gone.txt"), "gone").unwrap();
    reconcile::run(
        &store,
        tree.path().to_path_buf(),
        &Blake3Hasher,
        DEFAULT_HASH_SIZE_LIMIT,
    )
    .unwrap();

    fs::remove_file(tree.path().join("gone.txt")).unwrap();
    let summary = reconcile::run(
        &store,
        tree.path().to_path_buf(),
        &Blake3Hasher,
        DEFAULT_HASH_SIZE_LIMIT,
    )
    .unwrap();

    assert_eq!(summary.deleted, 1);
    assert_eq!(summary.created, 0);
    assert_eq!(summary.updated, 0);

    let records = store.load_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records.values().next().unwrap().name, "keep.txt");
}

#[test]
fn test_rename_without_mtime_change_is_a_no_op() {
    let tree = TempDir::new().unwrap();
    let db = TempDir::new().unwrap();
    let store = open_store(&db);

    fs::write(tree.path().join("old.txt"), "content").unwrap();
    reconcile::run(
        &store,
        tree.path().to_path_buf(),
        &Blake3Hasher,
        DEFAULT_HASH_SIZE_LIMIT,
    )
    .unwrap();

    // rename preserves inode and does not touch the file's own mtime
    fs::rename(tree.path().join("old.txt"), tree.path().join("new.txt")).unwrap();
    let summary = reconcile::run(
        &store,
        tree.path().to_path_buf(),
        &Blake3Hasher,
        DEFAULT_HASH_SIZE_LIMIT,
    )
    .unwrap();

    assert_eq!(summary.created, 0);
    assert_eq!(summary.updated, 0);
    assert_eq!(summary.deleted, 0);

    // The stored record keeps the stale name until the mtime advances.
    let records = store.load_all().unwrap();
    assert_eq!(records.values().next().unwrap().name, "old.txt");
}

#[test]
fn test_oversized_file_recorded_without_hash() {
    let tree = TempDir::new().unwrap();
    let db = TempDir::new().unwrap();
    let store = open_store(&db);

    fs::write(tree.path().join("small.bin"), vec![1u8; 100]).unwrap();
    fs::write(tree.path().join("big.bin"), vec![2u8; 101]).unwrap();

    // Limit of 100 bytes: small.bin sits exactly at the limit and is hashed,
    // big.bin is one byte over and is not.
    reconcile::run(&store, tree.path().to_path_buf(), &Blake3Hasher, 100).unwrap();

    let records = store.load_all().unwrap();
    let small = records.values().find(|r| r.name == "small.bin").unwrap();
    let big = records.values().find(|r| r.name == "big.bin").unwrap();
    assert!(small.hash.is_some());
    assert!(big.hash.is_none());
}

#[test]
fn test_reinitialize_rebuilds_from_scratch() {
    let tree = TempDir::new().unwrap();
    let db = TempDir::new().unwrap();
    let store = open_store(&db);

    fs::write(tree.path().join("a.txt"), "alpha").unwrap();
    reconcile::run(
        &store,
        tree.path().to_path_buf(),
        &Blake3Hasher,
        DEFAULT_HASH_SIZE_LIMIT,
    )
    .unwrap();
    assert_eq!(store.load_all().unwrap().len(), 1);

    store.reinitialize().unwrap();
    assert!(store.load_all().unwrap().is_empty());

    let summary = reconcile::run(
        &store,
        tree.path().to_path_buf(),
        &Blake3Hasher,
        DEFAULT_HASH_SIZE_LIMIT,
    )
    .unwrap();
    assert_eq!(summary.created, 1);
}

#[test]
fn test_failed_apply_leaves_store_untouched() {
    let tree = TempDir::new().unwrap();
    fs::write(tree.path().join("a.txt"), "alpha").unwrap();

    let store = MockStore::failing(Snapshot::new());
    let result = reconcile::run(
        &store,
        tree.path().to_path_buf(),
        &Blake3Hasher,
        DEFAULT_HASH_SIZE_LIMIT,
    );

    assert!(result.is_err());
    assert_eq!(*store.apply_calls.borrow(), 1);
    assert!(store.records.borrow().is_empty());
}

#[test]
fn test_missing_root_aborts_without_store_writes() {
    let db = TempDir::new().unwrap();
    let store = open_store(&db);

    let result = reconcile::run(
        &store,
        std::path::PathBuf::from("/nonexistent/filedex-test-root"),
        &Blake3Hasher,
        DEFAULT_HASH_SIZE_LIMIT,
    );

    assert!(result.is_err());
    assert!(store.load_all().unwrap().is_empty());
}
