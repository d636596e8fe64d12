//! Build-info artifact harvesting
//!
//! Runs only after the build process has exited. Reads every `*.json` file in
//! the toolchain's output directory, parses it, strips the toolchain's
//! configured keys and returns the documents in order. Any read or parse
//! failure aborts the whole harvest; no partial list is returned.

use crate::error::{BuildError, Result};
use crate::fs::FileSystem;
use crate::output::ParsedArtifact;
use crate::progress::{ProgressEvent, ProgressHandler};
use crate::toolchain::{MissingOutputPolicy, Toolchain};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

const JSON_SUFFIX: &str = ".json";

/// Order in which harvested files are processed and returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArtifactOrder {
    /// Whatever order the directory listing yields
    #[default]
    Listing,
    /// Sorted by file name
    Lexicographic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestOptions {
    pub missing_output_policy: MissingOutputPolicy,
    pub stripped_keys: Vec<String>,
    pub order: ArtifactOrder,
}

impl HarvestOptions {
    pub fn for_toolchain(toolchain: &dyn Toolchain) -> Self {
        Self {
            missing_output_policy: toolchain.missing_output_policy(),
            stripped_keys: toolchain.stripped_keys(),
            order: ArtifactOrder::Listing,
        }
    }

    pub fn with_order(mut self, order: ArtifactOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_missing_output_policy(mut self, policy: MissingOutputPolicy) -> Self {
        self.missing_output_policy = policy;
        self
    }
}

pub struct ArtifactHarvester {
    fs: Arc<dyn FileSystem>,
    progress: Arc<dyn ProgressHandler>,
}

impl ArtifactHarvester {
    pub fn new(fs: Arc<dyn FileSystem>, progress: Arc<dyn ProgressHandler>) -> Self {
        Self { fs, progress }
    }

    pub fn harvest(
        &self,
        output_dir: &Path,
        options: &HarvestOptions,
    ) -> Result<Vec<ParsedArtifact>> {
        self.ensure_output_dir(output_dir, options.missing_output_policy)?;

        self.progress.on_progress(&ProgressEvent::HarvestStarted {
            output_dir: output_dir.to_path_buf(),
        });

        let entries = self.fs.read_dir(output_dir).map_err(|e| BuildError::Io {
            path: output_dir.to_path_buf(),
            reason: format!("{:#}", e),
        })?;

        let mut candidates: Vec<_> = entries
            .into_iter()
            .filter(|entry| entry.is_file())
            .filter(|entry| entry.file_name().ends_with(JSON_SUFFIX))
            .collect();

        if options.order == ArtifactOrder::Lexicographic {
            candidates.sort_by(|a, b| a.name.cmp(&b.name));
        }

        debug!(
            dir = %output_dir.display(),
            files = candidates.len(),
            "Found build-info files"
        );

        let mut artifacts = Vec::with_capacity(candidates.len());
        for entry in candidates {
            let mut artifact = self.parse_file(entry.path(), entry.file_name())?;

            let mut stripped = false;
            for key in &options.stripped_keys {
                stripped |= artifact.strip_key(key);
            }

            self.progress.on_progress(&ProgressEvent::ArtifactCollected {
                file_name: entry.name.clone(),
                stripped,
            });
            artifacts.push(artifact);
        }

        Ok(artifacts)
    }

    fn ensure_output_dir(&self, output_dir: &Path, policy: MissingOutputPolicy) -> Result<()> {
        if self.fs.is_dir(output_dir) {
            return Ok(());
        }

        match policy {
            MissingOutputPolicy::Fail => Err(BuildError::MissingArtifacts {
                path: output_dir.to_path_buf(),
            }),
            MissingOutputPolicy::Create => {
                self.fs
                    .create_dir_all(output_dir)
                    .map_err(|e| BuildError::Io {
                        path: output_dir.to_path_buf(),
                        reason: format!("{:#}", e),
                    })?;
                self.progress.on_progress(&ProgressEvent::OutputDirCreated {
                    path: output_dir.to_path_buf(),
                });
                Ok(())
            }
        }
    }

    fn parse_file(&self, path: &Path, file_name: &str) -> Result<ParsedArtifact> {
        let content = self.fs.read_to_string(path).map_err(|e| BuildError::Io {
            path: path.to_path_buf(),
            reason: format!("{:#}", e),
        })?;

        let value: Value = serde_json::from_str(&content).map_err(|e| BuildError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        match value {
            Value::Object(document) => Ok(ParsedArtifact::new(file_name, document)),
            other => Err(BuildError::Parse {
                path: path.to_path_buf(),
                reason: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use crate::progress::{NoOpHandler, RecordingHandler};
    use serde_json::json;
    use std::path::PathBuf;

    fn harvester(fs: MockFileSystem) -> ArtifactHarvester {
        ArtifactHarvester::new(Arc::new(fs), Arc::new(NoOpHandler))
    }

    fn options(policy: MissingOutputPolicy, stripped: &[&str]) -> HarvestOptions {
        HarvestOptions {
            missing_output_policy: policy,
            stripped_keys: stripped.iter().map(|s| s.to_string()).collect(),
            order: ArtifactOrder::Listing,
        }
    }

    fn out_dir() -> PathBuf {
        PathBuf::from("/mock/out")
    }

    #[test]
    fn test_collects_only_json_files() {
        let fs = MockFileSystem::new();
        fs.add_file("out/a.json", r#"{"contractName":"Foo"}"#);
        fs.add_file("out/b.json", r#"{"contractName":"Bar"}"#);
        fs.add_file("out/notes.txt", "not json");

        let artifacts = harvester(fs)
            .harvest(&out_dir(), &options(MissingOutputPolicy::Fail, &[]))
            .unwrap();

        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].get("contractName"), Some(&json!("Foo")));
        assert_eq!(artifacts[1].get("contractName"), Some(&json!("Bar")));
    }

    #[test]
    fn test_listing_order_is_preserved() {
        let fs = MockFileSystem::new();
        fs.add_file("out/z.json", r#"{"n":1}"#);
        fs.add_file("out/a.json", r#"{"n":2}"#);

        let artifacts = harvester(fs)
            .harvest(&out_dir(), &options(MissingOutputPolicy::Fail, &[]))
            .unwrap();
        let names: Vec<&str> = artifacts.iter().map(|a| a.file_name()).collect();
        assert_eq!(names, vec!["z.json", "a.json"]);
    }

    #[test]
    fn test_lexicographic_order() {
        let fs = MockFileSystem::new();
        fs.add_file("out/z.json", r#"{"n":1}"#);
        fs.add_file("out/a.json", r#"{"n":2}"#);
        fs.add_file("out/m.json", r#"{"n":3}"#);

        let opts = options(MissingOutputPolicy::Fail, &[]).with_order(ArtifactOrder::Lexicographic);
        let artifacts = harvester(fs).harvest(&out_dir(), &opts).unwrap();
        let names: Vec<&str> = artifacts.iter().map(|a| a.file_name()).collect();
        assert_eq!(names, vec!["a.json", "m.json", "z.json"]);
    }

    #[test]
    fn test_missing_dir_fails_under_fail_policy() {
        let fs = MockFileSystem::new();
        let err = harvester(fs)
            .harvest(&out_dir(), &options(MissingOutputPolicy::Fail, &[]))
            .unwrap_err();

        assert_eq!(err, BuildError::MissingArtifacts { path: out_dir() });
        assert!(err.to_string().contains("Build info not found"));
    }

    #[test]
    fn test_missing_dir_is_created_under_create_policy() {
        let fs = Arc::new(MockFileSystem::new());
        let recorder = Arc::new(RecordingHandler::new());
        let harvester = ArtifactHarvester::new(fs.clone(), recorder.clone());

        let artifacts = harvester
            .harvest(&out_dir(), &options(MissingOutputPolicy::Create, &["output"]))
            .unwrap();

        assert!(artifacts.is_empty());
        assert!(fs.is_dir(&out_dir()));
        assert!(recorder
            .events()
            .contains(&ProgressEvent::OutputDirCreated { path: out_dir() }));
    }

    #[test]
    fn test_stripped_key_is_removed() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "out/build.json",
            r#"{"id":"abc","solcVersion":"0.8.20","input":{"sources":{}},"output":{"contracts":{"A.sol":{}}}}"#,
        );

        let artifacts = harvester(fs)
            .harvest(&out_dir(), &options(MissingOutputPolicy::Create, &["output"]))
            .unwrap();

        let doc = artifacts[0].document();
        assert!(!doc.contains_key("output"));
        assert_eq!(doc.get("id"), Some(&json!("abc")));
        assert_eq!(doc.get("solcVersion"), Some(&json!("0.8.20")));
        assert_eq!(doc.get("input"), Some(&json!({"sources": {}})));
    }

    #[test]
    fn test_document_without_stripped_key_passes_unchanged() {
        let raw = r#"{"id":"abc","input":{"language":"Solidity"}}"#;
        let fs = MockFileSystem::new();
        fs.add_file("out/build.json", raw);

        let artifacts = harvester(fs)
            .harvest(&out_dir(), &options(MissingOutputPolicy::Create, &["output"]))
            .unwrap();

        let expected: Value = serde_json::from_str(raw).unwrap();
        assert_eq!(Value::Object(artifacts[0].document().clone()), expected);
    }

    #[test]
    fn test_invalid_json_aborts_harvest() {
        let fs = MockFileSystem::new();
        fs.add_file("out/a.json", r#"{"contractName":"Foo"}"#);
        fs.add_file("out/b.json", r#"{"contractName": "Ba"#);

        let err = harvester(fs)
            .harvest(&out_dir(), &options(MissingOutputPolicy::Fail, &[]))
            .unwrap_err();

        match err {
            BuildError::Parse { path, .. } => assert_eq!(path, PathBuf::from("/mock/out/b.json")),
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_object_json_is_rejected() {
        let fs = MockFileSystem::new();
        fs.add_file("out/list.json", "[1, 2, 3]");

        let err = harvester(fs)
            .harvest(&out_dir(), &options(MissingOutputPolicy::Fail, &[]))
            .unwrap_err();
        assert!(err.to_string().contains("expected a JSON object, found an array"));
    }

    #[test]
    fn test_unreadable_file_is_io_error() {
        let fs = MockFileSystem::new();
        fs.add_unreadable_file("out/locked.json");

        let err = harvester(fs)
            .harvest(&out_dir(), &options(MissingOutputPolicy::Fail, &[]))
            .unwrap_err();
        assert_eq!(err.kind(), "io");
    }

    #[test]
    fn test_json_named_directory_is_skipped() {
        let fs = MockFileSystem::new();
        fs.add_dir("out/cache.json");
        fs.add_file("out/a.json", "{}");

        let artifacts = harvester(fs)
            .harvest(&out_dir(), &options(MissingOutputPolicy::Fail, &[]))
            .unwrap();
        assert_eq!(artifacts.len(), 1);
    }

    #[test]
    fn test_harvest_is_repeatable() {
        let fs = MockFileSystem::new();
        fs.add_file("out/a.json", r#"{"id":1,"output":{}}"#);
        fs.add_file("out/b.json", r#"{"id":2}"#);
        let harvester = harvester(fs);
        let opts = options(MissingOutputPolicy::Create, &["output"]);

        let first = harvester.harvest(&out_dir(), &opts).unwrap();
        let second = harvester.harvest(&out_dir(), &opts).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_options_for_toolchain() {
        let hardhat = crate::toolchain::HardhatToolchain::new();
        let opts = HarvestOptions::for_toolchain(&hardhat);
        assert_eq!(opts.missing_output_policy, MissingOutputPolicy::Create);
        assert_eq!(opts.stripped_keys, vec!["output".to_string()]);
        assert_eq!(opts.order, ArtifactOrder::Listing);
    }
}
