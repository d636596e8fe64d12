//! Hardhat toolchain
//!
//! Hardhat always writes build info to `artifacts/build-info`. Concurrent
//! builds of the same project share that directory and may observe each
//! other's files.

use super::{ComposedCommand, MissingOutputPolicy, PackageManager, Toolchain, ToolchainId};
use crate::fs::FileSystem;
use std::path::Path;

pub const BUILD_INFO_DIR: &str = "artifacts/build-info";

/// Raw compiler output; large and redundant with the rest of the document
const RAW_OUTPUT_KEY: &str = "output";

#[derive(Debug, Default, Clone, Copy)]
pub struct HardhatToolchain;

impl HardhatToolchain {
    pub fn new() -> Self {
        Self
    }

    pub fn command_for(manager: PackageManager) -> String {
        format!(
            "{} && {}",
            manager.install_command(),
            manager.exec_command("hardhat", "compile")
        )
    }
}

impl Toolchain for HardhatToolchain {
    fn id(&self) -> ToolchainId {
        ToolchainId::Hardhat
    }

    fn compose(&self, project_dir: &Path, fs: &dyn FileSystem) -> ComposedCommand {
        let manager = PackageManager::detect(project_dir, fs);

        ComposedCommand {
            command_line: Self::command_for(manager),
            working_dir: project_dir.to_path_buf(),
            output_dir: project_dir.join(BUILD_INFO_DIR),
        }
    }

    fn missing_output_policy(&self) -> MissingOutputPolicy {
        MissingOutputPolicy::Create
    }

    fn stripped_keys(&self) -> Vec<String> {
        vec![RAW_OUTPUT_KEY.to_string()]
    }
}
