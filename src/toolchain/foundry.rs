//! Foundry (`forge`) toolchain
//!
//! Every invocation writes its build info into a fresh
//! `out/build-info-<uuid>` directory, so concurrent builds of the same project
//! never read each other's files.

use super::{ComposedCommand, MissingOutputPolicy, Toolchain, ToolchainId};
use crate::fs::FileSystem;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const CONFIG_FILE: &str = "foundry.toml";
const GENERATE_CONFIG: &str = "forge config > foundry.toml";
const DEFAULT_OUT_DIR: &str = "out";

pub struct FoundryToolchain {
    out_dir: String,
}

impl FoundryToolchain {
    pub fn new() -> Self {
        Self {
            out_dir: DEFAULT_OUT_DIR.to_string(),
        }
    }

    fn unique_build_info_path(&self) -> String {
        format!("{}/build-info-{}", self.out_dir, Uuid::new_v4())
    }
}

impl Default for FoundryToolchain {
    fn default() -> Self {
        Self::new()
    }
}

impl Toolchain for FoundryToolchain {
    fn id(&self) -> ToolchainId {
        ToolchainId::Foundry
    }

    fn compose(&self, project_dir: &Path, fs: &dyn FileSystem) -> ComposedCommand {
        let build_info_path = self.unique_build_info_path();
        let build = format!(
            "forge build --build-info --build-info-path {}",
            build_info_path
        );

        let command_line = if fs.exists(&project_dir.join(CONFIG_FILE)) {
            build
        } else {
            format!("{} && {}", GENERATE_CONFIG, build)
        };

        ComposedCommand {
            command_line,
            working_dir: project_dir.to_path_buf(),
            output_dir: project_dir.join(PathBuf::from(build_info_path)),
        }
    }

    fn missing_output_policy(&self) -> MissingOutputPolicy {
        MissingOutputPolicy::Fail
    }
}
