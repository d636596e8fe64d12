//! Logging-based progress handler

use super::{OutputStream, ProgressEvent, ProgressHandler};
use tracing::{debug, info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started {
                project_dir,
                toolchain,
            } => {
                info!(project = %project_dir.display(), toolchain = %toolchain, "Starting build");
            }
            ProgressEvent::CommandComposed {
                command,
                output_dir,
            } => {
                debug!(
                    command = %command,
                    output_dir = %output_dir.display(),
                    "Composed build command"
                );
            }
            ProgressEvent::ProcessSpawned { pid } => {
                debug!(pid = ?pid, "Build process spawned");
            }
            ProgressEvent::Output { stream, line } => match stream {
                OutputStream::Stdout => info!(target: "solharvest::child", "{}", line),
                OutputStream::Stderr => warn!(target: "solharvest::child", "{}", line),
            },
            ProgressEvent::ProcessExited { exit_code, elapsed } => {
                info!(
                    exit_code = ?exit_code,
                    elapsed_ms = elapsed.as_millis(),
                    "Build process exited"
                );
            }
            ProgressEvent::OutputDirCreated { path } => {
                debug!(path = %path.display(), "Created missing build-info directory");
            }
            ProgressEvent::HarvestStarted { output_dir } => {
                debug!(output_dir = %output_dir.display(), "Harvesting build info");
            }
            ProgressEvent::ArtifactCollected {
                file_name,
                stripped,
            } => {
                debug!(file = %file_name, stripped, "Collected build info");
            }
            ProgressEvent::Completed {
                artifacts,
                total_time,
            } => {
                info!(
                    artifacts,
                    total_time_ms = total_time.as_millis(),
                    "Build complete"
                );
            }
            ProgressEvent::Failed { error } => {
                warn!(error = %error, "Build failed");
            }
        }
    }
}
