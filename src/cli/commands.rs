use crate::toolchain::{MissingOutputPolicy, ToolchainId};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Runs Foundry and Hardhat builds and collects their build-info artifacts
#[derive(Parser, Debug)]
#[command(
    name = "solharvest",
    about = "Runs Foundry and Hardhat builds and collects their build-info artifacts",
    version,
    long_about = "solharvest runs a smart-contract build with Foundry or Hardhat inside a \
                  project directory, relays the tool's output, and collects every build-info \
                  JSON file the build produced into a single result."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Run a build and collect its build-info files",
        long_about = "Composes the toolchain's build command from the project layout, runs it, \
                      and prints the collected build-info documents.\n\n\
                      Examples:\n  \
                      solharvest build --toolchain foundry\n  \
                      solharvest build ./contracts --toolchain hardhat --format json\n  \
                      solharvest build . -t foundry --timeout 600 --sort"
    )]
    Build(BuildArgs),

    #[command(
        about = "Collect build-info files from an existing output directory",
        long_about = "Reads an already populated build-info directory without running a build, \
                      applying the toolchain's stripping rules.\n\n\
                      Examples:\n  \
                      solharvest harvest artifacts/build-info --toolchain hardhat"
    )]
    Harvest(HarvestArgs),

    #[command(about = "Show the build command that would run, without running it")]
    Plan(PlanArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to the project (defaults to current directory)"
    )]
    pub project_path: Option<PathBuf>,

    #[arg(short = 't', long, value_enum, help = "Build toolchain")]
    pub toolchain: ToolchainArg,

    #[arg(
        long,
        value_name = "SECONDS",
        help = "Kill the build after this many seconds (overrides SOLHARVEST_TIMEOUT)"
    )]
    pub timeout: Option<u64>,

    #[arg(long, help = "Process build-info files in file-name order")]
    pub sort: bool,

    #[arg(
        long,
        value_enum,
        value_name = "POLICY",
        help = "What to do when the build-info directory is missing (default depends on toolchain)"
    )]
    pub missing_output: Option<PolicyArg>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct HarvestArgs {
    #[arg(value_name = "DIR", help = "Build-info directory to read")]
    pub dir: PathBuf,

    #[arg(short = 't', long, value_enum, help = "Toolchain that produced the files")]
    pub toolchain: ToolchainArg,

    #[arg(long, help = "Process build-info files in file-name order")]
    pub sort: bool,

    #[arg(
        long,
        value_enum,
        value_name = "POLICY",
        help = "What to do when DIR does not exist (default: fail)"
    )]
    pub missing_output: Option<PolicyArg>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "json",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct PlanArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to the project (defaults to current directory)"
    )]
    pub project_path: Option<PathBuf>,

    #[arg(short = 't', long, value_enum, help = "Build toolchain")]
    pub toolchain: ToolchainArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolchainArg {
    Foundry,
    Hardhat,
}

impl From<ToolchainArg> for ToolchainId {
    fn from(arg: ToolchainArg) -> Self {
        match arg {
            ToolchainArg::Foundry => ToolchainId::Foundry,
            ToolchainArg::Hardhat => ToolchainId::Hardhat,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyArg {
    Fail,
    Create,
}

impl From<PolicyArg> for MissingOutputPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Fail => MissingOutputPolicy::Fail,
            PolicyArg::Create => MissingOutputPolicy::Create,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
