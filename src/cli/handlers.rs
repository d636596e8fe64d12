//! Subcommand handlers
//!
//! Each handler returns the process exit code: 0 on success, 1 on any failure.

use super::commands::{BuildArgs, HarvestArgs, PlanArgs};
use super::output::{OutputFormat, OutputFormatter};
use crate::config::HarvestConfig;
use crate::fs::RealFileSystem;
use crate::harvest::{ArtifactHarvester, ArtifactOrder, HarvestOptions};
use crate::orchestrator::BuildOrchestrator;
use crate::output::BuildRequest;
use crate::progress::LoggingHandler;
use crate::toolchain::{MissingOutputPolicy, ToolchainId};
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

pub async fn handle_build(args: &BuildArgs, quiet: bool) -> i32 {
    let project_dir = match resolve_project_dir(args.project_path.as_deref()) {
        Ok(dir) => dir,
        Err(e) => {
            error!("{:#}", e);
            return 1;
        }
    };

    let mut config = match HarvestConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            warn!("Ignoring environment configuration: {}", e);
            HarvestConfig::defaults()
        }
    };
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    if args.sort {
        config.sort_artifacts = true;
    }
    if let Some(policy) = args.missing_output {
        config.missing_output_policy = Some(policy.into());
    }

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        eprintln!("\nPlease check your environment variables and command-line arguments.");
        return 1;
    }
    debug!("Effective configuration: {}", config);

    let toolchain: ToolchainId = args.toolchain.into();
    let orchestrator = BuildOrchestrator::for_toolchain(toolchain, config.build_options());
    let request = BuildRequest::new(&project_dir);

    let cancel = CancellationToken::new();
    let ctrl_c = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, stopping build");
                cancel.cancel();
            }
        })
    };

    info!("Building {} with {}", project_dir.display(), toolchain);
    let result = orchestrator.build_with_cancel(&request, cancel).await;
    ctrl_c.abort();

    let formatter = OutputFormatter::new(args.format.into());
    let output = match formatter.format_result(&result) {
        Ok(out) => out,
        Err(e) => {
            error!("Failed to format output: {}", e);
            return 1;
        }
    };

    if let Err(e) = emit(&output, args.output.as_deref(), quiet) {
        error!("{:#}", e);
        return 1;
    }

    if result.success {
        0
    } else {
        1
    }
}

pub async fn handle_harvest(args: &HarvestArgs, quiet: bool) -> i32 {
    let toolchain = ToolchainId::from(args.toolchain).toolchain();
    // A missing DIR fails unless --missing-output says otherwise
    let policy = args
        .missing_output
        .map(MissingOutputPolicy::from)
        .unwrap_or(MissingOutputPolicy::Fail);
    let mut options =
        HarvestOptions::for_toolchain(toolchain.as_ref()).with_missing_output_policy(policy);
    if args.sort {
        options = options.with_order(ArtifactOrder::Lexicographic);
    }

    let harvester =
        ArtifactHarvester::new(Arc::new(RealFileSystem::new()), Arc::new(LoggingHandler));
    let artifacts = match harvester.harvest(&args.dir, &options) {
        Ok(artifacts) => artifacts,
        Err(e) => {
            error!("{}", e);
            return 1;
        }
    };

    info!("Harvested {} build-info file(s)", artifacts.len());

    let format: OutputFormat = args.format.into();
    let output = match OutputFormatter::new(format).format_artifacts(&artifacts) {
        Ok(out) => out,
        Err(e) => {
            error!("Failed to format output: {}", e);
            return 1;
        }
    };

    match emit(&output, args.output.as_deref(), quiet) {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}

pub async fn handle_plan(args: &PlanArgs) -> i32 {
    let project_dir = match resolve_project_dir(args.project_path.as_deref()) {
        Ok(dir) => dir,
        Err(e) => {
            error!("{:#}", e);
            return 1;
        }
    };

    let toolchain: ToolchainId = args.toolchain.into();
    let orchestrator = BuildOrchestrator::for_toolchain(toolchain, Default::default());
    let command = orchestrator.plan(&BuildRequest::new(project_dir));

    match OutputFormatter::new(OutputFormat::Human).format_plan(toolchain, &command) {
        Ok(out) => {
            print!("{}", out);
            0
        }
        Err(e) => {
            error!("Failed to format output: {}", e);
            1
        }
    }
}

fn resolve_project_dir(path: Option<&Path>) -> Result<PathBuf> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => env::current_dir().context("Failed to get current directory")?,
    };

    if !path.is_dir() {
        anyhow::bail!("Project path is not a directory: {}", path.display());
    }

    path.canonicalize()
        .with_context(|| format!("Failed to canonicalize project path {}", path.display()))
}

fn emit(output: &str, file: Option<&Path>, quiet: bool) -> Result<()> {
    match file {
        Some(file) => {
            std::fs::write(file, output)
                .with_context(|| format!("Failed to write output to {}", file.display()))?;
            info!("Output written to: {}", file.display());
            if !quiet {
                println!("Output written to: {}", file.display());
            }
        }
        None => println!("{}", output),
    }
    Ok(())
}
