//! Package manager selection for Node-based toolchains

use crate::fs::FileSystem;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Lockfiles probed in order; the first one found selects the manager.
/// Projects may carry stale lockfiles from an earlier manager, so the order
/// is significant.
const LOCKFILE_PROBES: &[(&str, PackageManager)] = &[
    ("yarn.lock", PackageManager::Yarn),
    ("pnpm-lock.yaml", PackageManager::Pnpm),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    /// Selects the package manager for a project, defaulting to npm
    pub fn detect(project_dir: &Path, fs: &dyn FileSystem) -> Self {
        LOCKFILE_PROBES
            .iter()
            .find(|(lockfile, _)| fs.exists(&project_dir.join(lockfile)))
            .map(|(_, manager)| *manager)
            .unwrap_or(PackageManager::Npm)
    }

    pub fn name(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }

    pub fn install_command(&self) -> String {
        format!("{} install", self.name())
    }

    /// Runs a locally installed package binary, e.g. `npx hardhat`
    pub fn exec_command(&self, binary: &str, args: &str) -> String {
        let runner = match self {
            PackageManager::Npm => "npx",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        };
        if args.is_empty() {
            format!("{} {}", runner, binary)
        } else {
            format!("{} {} {}", runner, binary, args)
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
