//! Error types for build orchestration
//!
//! Every variant is terminal for the invocation that produced it. The
//! orchestrator converts them into a failed [`BuildResult`](crate::output::BuildResult)
//! instead of returning them to the caller.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while running a build or harvesting its artifacts
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The child process could not be spawned
    #[error("Failed to launch `{command}`: {reason}")]
    Launch { command: String, reason: String },

    /// The expected build-info directory was absent after the process exited
    #[error("Build info not found at {}: the build produced no build-info directory", path.display())]
    MissingArtifacts { path: PathBuf },

    /// A build-info file could not be parsed as a JSON object
    #[error("Failed to parse build info {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    /// A filesystem operation failed while harvesting
    #[error("I/O error at {}: {reason}", path.display())]
    Io { path: PathBuf, reason: String },

    /// The build exceeded its configured time limit and was killed
    #[error("Build timed out after {limit:?}")]
    Timeout { limit: Duration },

    /// The build was cancelled by the caller and was killed
    #[error("Build was cancelled")]
    Cancelled,
}

impl BuildError {
    /// Short machine-friendly name of the error kind, reported as `error_kind`
    /// in a failed [`BuildResult`](crate::output::BuildResult)
    pub fn kind(&self) -> &'static str {
        match self {
            BuildError::Launch { .. } => "launch",
            BuildError::MissingArtifacts { .. } => "missing_artifacts",
            BuildError::Parse { .. } => "parse",
            BuildError::Io { .. } => "io",
            BuildError::Timeout { .. } => "timeout",
            BuildError::Cancelled => "cancelled",
        }
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_artifacts_mentions_build_info() {
        let err = BuildError::MissingArtifacts {
            path: PathBuf::from("/p/out/build-info-123"),
        };
        let msg = err.to_string();
        assert!(msg.contains("Build info not found"));
        assert!(msg.contains("/p/out/build-info-123"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = BuildError::Parse {
            path: PathBuf::from("bad.json"),
            reason: "EOF while parsing an object at line 1 column 10".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to parse build info bad.json: EOF while parsing an object at line 1 column 10"
        );
    }

    #[test]
    fn test_launch_error_display() {
        let err = BuildError::Launch {
            command: "forge build".to_string(),
            reason: "No such file or directory".to_string(),
        };
        assert!(err.to_string().contains("forge build"));
    }

    #[test]
    fn test_timeout_keeps_sub_second_precision() {
        let err = BuildError::Timeout {
            limit: Duration::from_millis(200),
        };
        assert_eq!(err.to_string(), "Build timed out after 200ms");

        let err = BuildError::Timeout {
            limit: Duration::from_secs(600),
        };
        assert_eq!(err.to_string(), "Build timed out after 600s");
    }

    #[test]
    fn test_kinds() {
        assert_eq!(BuildError::Cancelled.kind(), "cancelled");
        assert_eq!(
            BuildError::Timeout {
                limit: Duration::from_secs(5)
            }
            .kind(),
            "timeout"
        );
        assert_eq!(
            BuildError::Io {
                path: PathBuf::from("x"),
                reason: "denied".to_string()
            }
            .kind(),
            "io"
        );
    }
}
