//! Build toolchains and command composition
//!
//! A [`Toolchain`] knows three things about an external smart-contract build
//! tool: how to turn a project directory into a shell command line, where the
//! tool leaves its build-info files, and how the harvester must treat them
//! (what to do when the directory is missing, which keys to strip).
//!
//! Composition is pure string construction over filesystem existence probes
//! and cannot fail.

mod foundry;
mod hardhat;
mod package_manager;

pub use foundry::FoundryToolchain;
pub use hardhat::HardhatToolchain;
pub use package_manager::PackageManager;

use crate::fs::FileSystem;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Identifies one of the supported toolchains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolchainId {
    Foundry,
    Hardhat,
}

impl ToolchainId {
    pub fn name(&self) -> &'static str {
        match self {
            ToolchainId::Foundry => "foundry",
            ToolchainId::Hardhat => "hardhat",
        }
    }

    /// Default toolchain implementation for this identifier
    pub fn toolchain(&self) -> Arc<dyn Toolchain> {
        match self {
            ToolchainId::Foundry => Arc::new(FoundryToolchain::new()),
            ToolchainId::Hardhat => Arc::new(HardhatToolchain::new()),
        }
    }
}

impl fmt::Display for ToolchainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the harvester does when the expected build-info directory is absent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingOutputPolicy {
    /// Fail the build with a missing-artifacts error
    Fail,
    /// Create the directory and continue, yielding zero artifacts
    Create,
}

/// A shell command ready to be spawned, plus where its output will land
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedCommand {
    /// Full shell command line
    pub command_line: String,
    /// Directory the command runs in
    pub working_dir: PathBuf,
    /// Directory the harvester reads after the process exits
    pub output_dir: PathBuf,
}

/// An external build tool whose build-info files can be harvested
pub trait Toolchain: Send + Sync {
    fn id(&self) -> ToolchainId;

    /// Derives the command to run from the state of `project_dir`
    fn compose(&self, project_dir: &Path, fs: &dyn FileSystem) -> ComposedCommand;

    fn missing_output_policy(&self) -> MissingOutputPolicy;

    /// Top-level keys removed from every harvested document
    fn stripped_keys(&self) -> Vec<String> {
        Vec::new()
    }
}
