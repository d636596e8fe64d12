//! Harvester tests against a real filesystem

mod support;

use solharvest::fs::RealFileSystem;
use solharvest::progress::{NoOpHandler, ProgressEvent, RecordingHandler};
use solharvest::toolchain::{FoundryToolchain, HardhatToolchain};
use solharvest::{ArtifactHarvester, ArtifactOrder, BuildError, HarvestOptions};
use std::sync::Arc;
use support::{build_info, write_file};
use tempfile::TempDir;

fn harvester() -> ArtifactHarvester {
    ArtifactHarvester::new(Arc::new(RealFileSystem::new()), Arc::new(NoOpHandler))
}

fn foundry_options() -> HarvestOptions {
    HarvestOptions::for_toolchain(&FoundryToolchain::new()).with_order(ArtifactOrder::Lexicographic)
}

fn hardhat_options() -> HarvestOptions {
    HarvestOptions::for_toolchain(&HardhatToolchain::new()).with_order(ArtifactOrder::Lexicographic)
}

#[test]
fn test_two_json_files_and_a_note() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "a.json", &build_info("a", false));
    write_file(temp.path(), "b.json", &build_info("b", false));
    write_file(temp.path(), "notes.txt", "hello");

    let artifacts = harvester().harvest(temp.path(), &foundry_options()).unwrap();

    assert_eq!(artifacts.len(), 2);
    assert_eq!(artifacts[0].get("id").unwrap(), "a");
    assert_eq!(artifacts[1].get("id").unwrap(), "b");
}

#[test]
fn test_subdirectory_named_like_json_is_skipped() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "a.json", &build_info("a", false));
    std::fs::create_dir(temp.path().join("nested.json")).unwrap();

    let artifacts = harvester().harvest(temp.path(), &foundry_options()).unwrap();
    assert_eq!(artifacts.len(), 1);
}

#[test]
fn test_missing_dir_under_fail_policy() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("out/build-info-gone");

    let err = harvester().harvest(&missing, &foundry_options()).unwrap_err();

    assert_eq!(err, BuildError::MissingArtifacts { path: missing.clone() });
    assert!(err.to_string().starts_with("Build info not found"));
    assert!(!missing.exists());
}

#[test]
fn test_missing_dir_under_create_policy() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("artifacts/build-info");
    let recorder = Arc::new(RecordingHandler::new());
    let harvester = ArtifactHarvester::new(Arc::new(RealFileSystem::new()), recorder.clone());

    let artifacts = harvester.harvest(&dir, &hardhat_options()).unwrap();

    assert!(artifacts.is_empty());
    assert!(dir.is_dir());
    assert!(recorder
        .events()
        .iter()
        .any(|e| matches!(e, ProgressEvent::OutputDirCreated { path } if path == &dir)));
}

#[test]
fn test_hardhat_strips_output_and_keeps_the_rest() {
    let temp = TempDir::new().unwrap();
    let raw = r#"{"id":"x","solcVersion":"0.8.20","input":{"a":1},"output":{"contracts":{}}}"#;
    write_file(temp.path(), "x.json", raw);

    let artifacts = harvester().harvest(temp.path(), &hardhat_options()).unwrap();

    let doc = artifacts[0].document();
    assert_eq!(doc.len(), 3);
    assert!(!doc.contains_key("output"));
    assert_eq!(doc["input"], serde_json::json!({"a": 1}));
}

#[test]
fn test_foundry_keeps_output() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "x.json", &build_info("x", true));

    let artifacts = harvester().harvest(temp.path(), &foundry_options()).unwrap();
    assert!(artifacts[0].contains_key("output"));
}

#[test]
fn test_truncated_file_fails_whole_harvest() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "a.json", &build_info("a", false));
    let bad = write_file(temp.path(), "b.json", r#"{"id": "b""#);

    let err = harvester().harvest(temp.path(), &foundry_options()).unwrap_err();

    match err {
        BuildError::Parse { path, .. } => assert_eq!(path, bad),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_harvest_is_idempotent() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "a.json", &build_info("a", true));
    write_file(temp.path(), "b.json", &build_info("b", true));

    let first = harvester().harvest(temp.path(), &hardhat_options()).unwrap();
    let second = harvester().harvest(temp.path(), &hardhat_options()).unwrap();

    assert_eq!(first, second);
    // Stripping happens in memory only
    let on_disk = std::fs::read_to_string(temp.path().join("a.json")).unwrap();
    assert!(on_disk.contains("\"output\""));
}
