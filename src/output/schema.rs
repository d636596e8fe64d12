//! Build request and result data structures
//!
//! A [`BuildResult`] is created exactly once per invocation, when the build has
//! finished (or failed), and ownership passes to the caller. Its constructors
//! enforce the result invariants: a successful result never carries an error,
//! and a failed result always carries a non-empty error and no artifacts.

use crate::error::BuildError;
use crate::toolchain::ToolchainId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// A request to build one project directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    project_dir: PathBuf,
}

impl BuildRequest {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }
}

/// One parsed build-info document
///
/// Serializes as the bare JSON document; the originating file name is kept
/// for logging and diagnostics only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParsedArtifact {
    #[serde(skip)]
    file_name: String,
    document: Map<String, Value>,
}

impl ParsedArtifact {
    pub fn new(file_name: impl Into<String>, document: Map<String, Value>) -> Self {
        Self {
            file_name: file_name.into(),
            document,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn document(&self) -> &Map<String, Value> {
        &self.document
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.document.contains_key(key)
    }

    /// Removes a top-level key, returning whether it was present
    pub fn strip_key(&mut self, key: &str) -> bool {
        self.document.remove(key).is_some()
    }
}

/// Outcome of one build invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildResult {
    pub success: bool,
    pub artifacts: Vec<ParsedArtifact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Machine-readable failure category, see [`BuildError::kind`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    pub toolchain: ToolchainId,
    /// Raw exit code of the build process, when it ran to completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    pub duration_ms: u64,
    pub finished_at: DateTime<Utc>,
}

impl BuildResult {
    pub fn succeeded(toolchain: ToolchainId, artifacts: Vec<ParsedArtifact>) -> Self {
        Self {
            success: true,
            artifacts,
            error: None,
            error_kind: None,
            toolchain,
            exit_code: None,
            output_dir: None,
            duration_ms: 0,
            finished_at: Utc::now(),
        }
    }

    pub fn failed(toolchain: ToolchainId, error: impl Into<String>) -> Self {
        let mut error = error.into();
        if error.trim().is_empty() {
            error = "build failed without an error description".to_string();
        }

        Self {
            success: false,
            artifacts: Vec::new(),
            error: Some(error),
            error_kind: None,
            toolchain,
            exit_code: None,
            output_dir: None,
            duration_ms: 0,
            finished_at: Utc::now(),
        }
    }

    /// Failed result carrying both the message and the kind of `error`
    pub fn from_error(toolchain: ToolchainId, error: &BuildError) -> Self {
        let mut result = Self::failed(toolchain, error.to_string());
        result.error_kind = Some(error.kind().to_string());
        result
    }

    pub fn with_exit_code(mut self, exit_code: Option<i32>) -> Self {
        self.exit_code = exit_code;
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn artifact_count(&self) -> usize {
        self.artifacts.len()
    }
}
