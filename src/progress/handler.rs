//! Progress handler trait and events

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Which child stream a relayed line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

impl fmt::Display for OutputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputStream::Stdout => write!(f, "stdout"),
            OutputStream::Stderr => write!(f, "stderr"),
        }
    }
}

/// Events emitted during a build invocation
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Build started for a project
    Started {
        project_dir: PathBuf,
        toolchain: String,
    },

    /// Shell command composed from the project layout
    CommandComposed { command: String, output_dir: PathBuf },

    /// Child process spawned
    ProcessSpawned { pid: Option<u32> },

    /// One line of child output, relayed verbatim
    Output { stream: OutputStream, line: String },

    /// Child process terminated
    ProcessExited {
        exit_code: Option<i32>,
        elapsed: Duration,
    },

    /// Missing output directory created by policy
    OutputDirCreated { path: PathBuf },

    /// Harvesting started
    HarvestStarted { output_dir: PathBuf },

    /// One build-info file parsed and collected
    ArtifactCollected { file_name: String, stripped: bool },

    /// Build completed successfully
    Completed {
        artifacts: usize,
        total_time: Duration,
    },

    /// Build failed
    Failed { error: String },
}

/// Trait for handling progress events during a build
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}
