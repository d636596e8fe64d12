//! Shared helpers for integration tests

#![allow(dead_code)]

use solharvest::fs::FileSystem;
use solharvest::toolchain::{ComposedCommand, MissingOutputPolicy, Toolchain, ToolchainId};
use std::fs;
use std::path::{Path, PathBuf};

/// A toolchain that runs an arbitrary shell script in place of a real build tool
pub struct ScriptToolchain {
    pub id: ToolchainId,
    pub script: String,
    pub output_subdir: String,
    pub policy: MissingOutputPolicy,
    pub stripped: Vec<String>,
}

impl ScriptToolchain {
    /// Foundry-shaped: fails when the output directory is missing, strips nothing
    pub fn foundry_like(script: impl Into<String>, output_subdir: impl Into<String>) -> Self {
        Self {
            id: ToolchainId::Foundry,
            script: script.into(),
            output_subdir: output_subdir.into(),
            policy: MissingOutputPolicy::Fail,
            stripped: Vec::new(),
        }
    }

    /// Hardhat-shaped: creates the output directory, strips `output`
    pub fn hardhat_like(script: impl Into<String>) -> Self {
        Self {
            id: ToolchainId::Hardhat,
            script: script.into(),
            output_subdir: "artifacts/build-info".to_string(),
            policy: MissingOutputPolicy::Create,
            stripped: vec!["output".to_string()],
        }
    }
}

impl Toolchain for ScriptToolchain {
    fn id(&self) -> ToolchainId {
        self.id
    }

    fn compose(&self, project_dir: &Path, _fs: &dyn FileSystem) -> ComposedCommand {
        ComposedCommand {
            command_line: self.script.clone(),
            working_dir: project_dir.to_path_buf(),
            output_dir: project_dir.join(&self.output_subdir),
        }
    }

    fn missing_output_policy(&self) -> MissingOutputPolicy {
        self.policy
    }

    fn stripped_keys(&self) -> Vec<String> {
        self.stripped.clone()
    }
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

/// A small build-info document in the shape both toolchains emit
pub fn build_info(id: &str, with_output: bool) -> String {
    let mut doc = serde_json::json!({
        "id": id,
        "_format": "hh-sol-build-info-1",
        "solcVersion": "0.8.20",
        "input": { "language": "Solidity", "sources": {} },
    });
    if with_output {
        doc["output"] = serde_json::json!({ "contracts": {} });
    }
    doc.to_string()
}
