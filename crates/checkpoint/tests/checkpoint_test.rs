//! Integration tests for the checkpoint store

use lawabbr_checkpoint::{load, CheckpointStore};
use lawabbr_core::{AbbrPair, DatasetItem, Error, ResultRecord};
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use tempfile::TempDir;

fn record(file: &str, index: usize, pairs: Vec<AbbrPair>) -> ResultRecord {
    let item = DatasetItem {
        index,
        file: file.to_string(),
        text: "この法律において「個人情報」とは、生存する個人に関する情報をいう。".to_string(),
        ground_truth: vec![],
    };
    ResultRecord::new(&item, pairs)
}

#[test]
fn test_reopen_resumes_recorded_results() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.json");

    {
        let mut store = CheckpointStore::open(&path).unwrap();
        store
            .append(record("a.xml", 0, vec![AbbrPair::new("生存する個人に関する情報", "個人情報")]))
            .unwrap();
        store.append(record("a.xml", 2, vec![])).unwrap();
    }

    let store = CheckpointStore::open(&path).unwrap();
    assert_eq!(store.len(), 2);
    assert!(store.contains_id("a.xml_0"));
    assert!(store.contains_id("a.xml_2"));
    assert!(!store.contains_id("a.xml_1"));
    assert_eq!(store.records()[1].id, "a.xml_2");
}

#[test]
fn test_output_ids_are_unique() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.json");
    let mut store = CheckpointStore::open(&path).unwrap();

    for index in 0..5 {
        store.append(record("b.xml", index, vec![])).unwrap();
    }
    assert!(store.append(record("b.xml", 3, vec![])).is_err());
    drop(store);

    let records = load(&path).unwrap();
    let ids: HashSet<_> = records.iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids.len(), records.len());
    assert_eq!(records.len(), 5);
}

#[test]
fn test_non_ascii_written_literally() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.json");
    let mut store = CheckpointStore::open(&path).unwrap();

    store
        .append(record("c.xml", 0, vec![AbbrPair::new("生存する個人に関する情報", "個人情報")]))
        .unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("個人情報"));
    assert!(!content.contains("\\u"));
}

#[test]
fn test_corrupt_checkpoint_halts_open() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.json");
    std::fs::write(&path, "not json at all").unwrap();

    let err = CheckpointStore::open(&path).err().unwrap();
    assert!(matches!(err, Error::CorruptCheckpoint { .. }));

    // The file is left untouched for the operator to inspect
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json at all");
}

#[test]
fn test_checkpoint_with_duplicate_ids_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.json");
    let records = vec![record("d.xml", 0, vec![]), record("d.xml", 0, vec![])];
    std::fs::write(&path, serde_json::to_string_pretty(&records).unwrap()).unwrap();

    let err = CheckpointStore::open(&path).err().unwrap();
    assert!(matches!(err, Error::CorruptCheckpoint { .. }));
}

#[test]
fn test_lock_prevents_concurrent_open() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.json");

    let first = CheckpointStore::open(&path).unwrap();
    let second = CheckpointStore::open(&path);
    assert!(matches!(second, Err(Error::CheckpointLocked { .. })));

    drop(first);
    assert!(CheckpointStore::open(&path).is_ok());
}

#[test]
fn test_failed_write_leaves_record_unstored() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.json");
    let mut store = CheckpointStore::open(&path).unwrap();

    // A directory at the output path makes the final rename fail
    std::fs::create_dir(&path).unwrap();
    assert!(store.append(record("e.xml", 0, vec![])).is_err());
    assert!(!store.contains_id("e.xml_0"));
    assert!(store.is_empty());

    std::fs::remove_dir(&path).unwrap();
    store.append(record("e.xml", 0, vec![])).unwrap();
    assert!(store.contains_id("e.xml_0"));
    assert_eq!(load(&path).unwrap().len(), 1);
}
