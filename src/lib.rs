//! solharvest - build-info collection for Solidity toolchains
//!
//! Runs a smart-contract build with Foundry or Hardhat inside a project
//! directory, relays the tool's output while it runs, and collects every
//! build-info JSON file the build emitted into a single [`BuildResult`].
//!
//! # Core Concepts
//!
//! - **Toolchain**: composes the shell command for a project (`forge build`,
//!   `npx hardhat compile`, ...) and knows where build-info lands
//! - **Process runner**: spawns the command, relays stdout/stderr line by line
//!   and waits for exit, honouring a timeout and a cancellation token
//! - **Harvester**: reads the build-info directory after the build exits,
//!   parses each `.json` file and strips toolchain-specific keys
//!
//! # Example Usage
//!
//! ```no_run
//! # async fn demo() {
//! let result = solharvest::run_hardhat("./contracts").await;
//! if result.success {
//!     println!("{} build-info files", result.artifacts.len());
//! } else {
//!     eprintln!("{}", result.error.unwrap_or_default());
//! }
//! # }
//! ```
//!
//! Concurrent builds in the same Hardhat project share
//! `artifacts/build-info` and may observe each other's files. Foundry builds
//! write to a fresh directory per invocation.

pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod harvest;
pub mod orchestrator;
pub mod output;
pub mod process;
pub mod progress;
pub mod toolchain;
pub mod util;

pub use config::{ConfigError, HarvestConfig};
pub use error::BuildError;
pub use harvest::{ArtifactHarvester, ArtifactOrder, HarvestOptions};
pub use orchestrator::{run_foundry, run_hardhat, BuildOptions, BuildOrchestrator};
pub use output::{BuildRequest, BuildResult, ParsedArtifact};
pub use progress::{LoggingHandler, ProgressEvent, ProgressHandler};
pub use toolchain::{
    ComposedCommand, MissingOutputPolicy, PackageManager, Toolchain, ToolchainId,
};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
