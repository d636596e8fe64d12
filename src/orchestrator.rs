//! Build orchestration
//!
//! Composes the toolchain command, runs it, waits for it to exit and harvests
//! the build-info files it produced. [`BuildOrchestrator::build`] never
//! returns an error: every failure along the way is reported as a
//! [`BuildResult`] with `success = false`.

use crate::error::{BuildError, Result};
use crate::fs::{FileSystem, RealFileSystem};
use crate::harvest::{ArtifactHarvester, ArtifactOrder, HarvestOptions};
use crate::output::{BuildRequest, BuildResult, ParsedArtifact};
use crate::process::ProcessRunner;
use crate::progress::{LoggingHandler, ProgressEvent, ProgressHandler};
use crate::toolchain::{ComposedCommand, MissingOutputPolicy, Toolchain, ToolchainId};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Per-orchestrator build settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Kill the build after this long; `None` waits indefinitely
    pub timeout: Option<Duration>,
    pub order: ArtifactOrder,
    /// Overrides the toolchain's own missing-directory policy
    pub missing_output_policy: Option<MissingOutputPolicy>,
}

pub struct BuildOrchestrator {
    toolchain: Arc<dyn Toolchain>,
    fs: Arc<dyn FileSystem>,
    progress: Arc<dyn ProgressHandler>,
    options: BuildOptions,
}

impl BuildOrchestrator {
    pub fn new(
        toolchain: Arc<dyn Toolchain>,
        fs: Arc<dyn FileSystem>,
        progress: Arc<dyn ProgressHandler>,
        options: BuildOptions,
    ) -> Self {
        Self {
            toolchain,
            fs,
            progress,
            options,
        }
    }

    /// Orchestrator for a built-in toolchain on the real filesystem, logging via tracing
    pub fn for_toolchain(id: ToolchainId, options: BuildOptions) -> Self {
        Self::new(
            id.toolchain(),
            Arc::new(RealFileSystem::new()),
            Arc::new(LoggingHandler),
            options,
        )
    }

    pub fn toolchain_id(&self) -> ToolchainId {
        self.toolchain.id()
    }

    pub fn harvest_options(&self) -> HarvestOptions {
        let options =
            HarvestOptions::for_toolchain(self.toolchain.as_ref()).with_order(self.options.order);
        match self.options.missing_output_policy {
            Some(policy) => options.with_missing_output_policy(policy),
            None => options,
        }
    }

    /// Composes the command for a project without running it
    pub fn plan(&self, request: &BuildRequest) -> ComposedCommand {
        self.toolchain.compose(request.project_dir(), self.fs.as_ref())
    }

    pub async fn build(&self, request: &BuildRequest) -> BuildResult {
        self.build_with_cancel(request, CancellationToken::new()).await
    }

    pub async fn build_with_cancel(
        &self,
        request: &BuildRequest,
        cancel: CancellationToken,
    ) -> BuildResult {
        let start = Instant::now();
        let toolchain = self.toolchain.id();

        self.progress.on_progress(&ProgressEvent::Started {
            project_dir: request.project_dir().to_path_buf(),
            toolchain: toolchain.to_string(),
        });

        let composed = self.plan(request);
        self.progress.on_progress(&ProgressEvent::CommandComposed {
            command: composed.command_line.clone(),
            output_dir: composed.output_dir.clone(),
        });

        let (exit_code, outcome) = self.execute(&composed, &cancel).await;
        let elapsed = start.elapsed();

        let result = match outcome {
            Ok(artifacts) => {
                info!(
                    toolchain = %toolchain,
                    artifacts = artifacts.len(),
                    "Collected build info"
                );
                self.progress.on_progress(&ProgressEvent::Completed {
                    artifacts: artifacts.len(),
                    total_time: elapsed,
                });
                BuildResult::succeeded(toolchain, artifacts)
            }
            Err(e) => {
                self.progress.on_progress(&ProgressEvent::Failed {
                    error: e.to_string(),
                });
                BuildResult::from_error(toolchain, &e)
            }
        };

        result
            .with_exit_code(exit_code)
            .with_output_dir(composed.output_dir)
            .with_duration_ms(elapsed.as_millis() as u64)
    }

    async fn execute(
        &self,
        composed: &ComposedCommand,
        cancel: &CancellationToken,
    ) -> (Option<i32>, Result<Vec<ParsedArtifact>>) {
        let running = match ProcessRunner::spawn(composed, self.progress.clone()) {
            Ok(running) => running,
            Err(e) => return (None, Err(e)),
        };

        let exit = match running.wait(cancel, self.options.timeout).await {
            Ok(exit) => exit,
            Err(e) => return (None, Err(e)),
        };

        self.progress.on_progress(&ProgressEvent::ProcessExited {
            exit_code: exit.exit_code,
            elapsed: exit.elapsed,
        });
        if exit.exit_code != Some(0) {
            debug!(
                exit_code = ?exit.exit_code,
                "Build process exited unsuccessfully, harvesting anyway"
            );
        }

        (exit.exit_code, self.harvest(&composed.output_dir).await)
    }

    async fn harvest(&self, output_dir: &Path) -> Result<Vec<ParsedArtifact>> {
        let harvester = ArtifactHarvester::new(self.fs.clone(), self.progress.clone());
        let options = self.harvest_options();
        let dir = output_dir.to_path_buf();

        tokio::task::spawn_blocking(move || harvester.harvest(&dir, &options))
            .await
            .map_err(|e| BuildError::Io {
                path: output_dir.to_path_buf(),
                reason: format!("harvest task failed: {}", e),
            })?
    }
}

/// Runs a Foundry build with default settings
pub async fn run_foundry(project_dir: impl AsRef<Path>) -> BuildResult {
    BuildOrchestrator::for_toolchain(ToolchainId::Foundry, BuildOptions::default())
        .build(&BuildRequest::new(project_dir.as_ref()))
        .await
}

/// Runs a Hardhat build with default settings
pub async fn run_hardhat(project_dir: impl AsRef<Path>) -> BuildResult {
    BuildOrchestrator::for_toolchain(ToolchainId::Hardhat, BuildOptions::default())
        .build(&BuildRequest::new(project_dir.as_ref()))
        .await
}
