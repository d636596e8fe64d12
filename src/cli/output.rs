//! Output formatting for build results
//!
//! JSON output is the serialized [`BuildResult`] (or artifact list) and is
//! what scripts consume. Human output is a short summary meant for a terminal.

use anyhow::{Context, Result};
use serde_json::json;

use crate::output::{BuildResult, ParsedArtifact};
use crate::toolchain::{ComposedCommand, ToolchainId};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// Human-readable formatted text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_result(&self, result: &BuildResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(result)
                .context("Failed to serialize build result to JSON"),
            OutputFormat::Human => Ok(self.format_result_human(result)),
        }
    }

    /// Formats the artifacts collected by a standalone harvest
    pub fn format_artifacts(&self, artifacts: &[ParsedArtifact]) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(artifacts)
                .context("Failed to serialize artifacts to JSON"),
            OutputFormat::Human => {
                let mut output = format!("Collected {} build-info file(s)\n", artifacts.len());
                push_artifact_list(&mut output, artifacts);
                Ok(output)
            }
        }
    }

    pub fn format_plan(&self, toolchain: ToolchainId, command: &ComposedCommand) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let plan = json!({
                    "toolchain": toolchain,
                    "command": command.command_line,
                    "working_dir": command.working_dir,
                    "output_dir": command.output_dir,
                });
                serde_json::to_string_pretty(&plan).context("Failed to serialize plan to JSON")
            }
            OutputFormat::Human => Ok(format!(
                "Toolchain:   {}\nWorking dir: {}\nCommand:     {}\nOutput dir:  {}\n",
                toolchain,
                command.working_dir.display(),
                command.command_line,
                command.output_dir.display()
            )),
        }
    }

    fn format_result_human(&self, result: &BuildResult) -> String {
        let mut output = String::new();

        if result.success {
            output.push_str(&format!("\u{2713} {} build succeeded\n", result.toolchain));
        } else {
            output.push_str(&format!("\u{2717} {} build failed\n", result.toolchain));
        }
        output.push_str(RULE);
        output.push_str("\n\n");

        if let Some(ref dir) = result.output_dir {
            output.push_str(&format!("Output dir:  {}\n", dir.display()));
        }
        match result.exit_code {
            Some(code) => output.push_str(&format!("Exit code:   {}\n", code)),
            None => output.push_str("Exit code:   (none)\n"),
        }

        if let Some(ref error) = result.error {
            output.push_str(&format!("\nError: {}\n", error));
        } else {
            output.push_str(&format!("\nArtifacts ({}):\n", result.artifact_count()));
            push_artifact_list(&mut output, &result.artifacts);
        }

        output.push_str(&format!("\nFinished in {}ms\n", result.duration_ms));
        output
    }
}

fn push_artifact_list(output: &mut String, artifacts: &[ParsedArtifact]) {
    for (i, artifact) in artifacts.iter().enumerate() {
        let connector = if i == artifacts.len() - 1 {
            "\u{2514}"
        } else {
            "\u{251C}"
        };
        let solc = artifact
            .get("solcVersion")
            .and_then(|v| v.as_str())
            .map(|v| format!(" (solc {})", v))
            .unwrap_or_default();
        output.push_str(&format!("{}\u{2500} {}{}\n", connector, artifact.file_name(), solc));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value};
    use std::path::PathBuf;

    fn artifact(name: &str, solc: &str) -> ParsedArtifact {
        let mut doc = Map::new();
        doc.insert("solcVersion".to_string(), Value::String(solc.to_string()));
        ParsedArtifact::new(name, doc)
    }

    #[test]
    fn test_json_result_is_document_list() {
        let result =
            BuildResult::succeeded(ToolchainId::Hardhat, vec![artifact("a.json", "0.8.20")]);
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let output = formatter.format_result(&result).unwrap();

        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["success"], true);
        assert_eq!(parsed["toolchain"], "hardhat");
        assert_eq!(parsed["artifacts"][0]["solcVersion"], "0.8.20");
        assert!(parsed.get("error").is_none());
    }

    #[test]
    fn test_human_success() {
        let result = BuildResult::succeeded(
            ToolchainId::Foundry,
            vec![artifact("a.json", "0.8.20"), artifact("b.json", "0.8.19")],
        )
        .with_exit_code(Some(0))
        .with_duration_ms(42);
        let output = OutputFormatter::new(OutputFormat::Human)
            .format_result(&result)
            .unwrap();

        assert!(output.contains("foundry build succeeded"));
        assert!(output.contains("Artifacts (2)"));
        assert!(output.contains("\u{251C}\u{2500} a.json (solc 0.8.20)"));
        assert!(output.contains("\u{2514}\u{2500} b.json (solc 0.8.19)"));
        assert!(output.contains("42ms"));
    }

    #[test]
    fn test_human_failure() {
        let result = BuildResult::failed(ToolchainId::Foundry, "Build info not found at /x");
        let output = OutputFormatter::new(OutputFormat::Human)
            .format_result(&result)
            .unwrap();

        assert!(output.contains("foundry build failed"));
        assert!(output.contains("Error: Build info not found at /x"));
        assert!(!output.contains("Artifacts"));
    }

    #[test]
    fn test_plan_json() {
        let command = ComposedCommand {
            command_line: "npm install && npx hardhat compile".to_string(),
            working_dir: PathBuf::from("/p"),
            output_dir: PathBuf::from("/p/artifacts/build-info"),
        };
        let output = OutputFormatter::new(OutputFormat::Json)
            .format_plan(ToolchainId::Hardhat, &command)
            .unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["command"], "npm install && npx hardhat compile");
        assert_eq!(parsed["output_dir"], "/p/artifacts/build-info");
    }

    #[test]
    fn test_empty_artifacts_human() {
        let output = OutputFormatter::new(OutputFormat::Human)
            .format_artifacts(&[])
            .unwrap();
        assert_eq!(output, "Collected 0 build-info file(s)\n");
    }
}
