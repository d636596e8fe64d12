pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{BuildArgs, CliArgs, Commands, HarvestArgs, PlanArgs};
pub use output::{OutputFormat, OutputFormatter};
