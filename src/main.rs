use solharvest::cli::commands::{CliArgs, Commands};
use solharvest::cli::handlers::{handle_build, handle_harvest, handle_plan};
use solharvest::util::logging::{init_logging, parse_level, LoggingConfig};
use solharvest::VERSION;

use clap::Parser;
use tracing::{debug, Level};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("solharvest v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Build(build_args) => handle_build(build_args, args.quiet).await,
        Commands::Harvest(harvest_args) => handle_harvest(harvest_args, args.quiet).await,
        Commands::Plan(plan_args) => handle_plan(plan_args).await,
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let config = LoggingConfig::from_env();

    let config = if let Some(level_str) = &args.log_level {
        config.with_level(parse_level(level_str))
    } else if args.verbose {
        config.with_level(Level::DEBUG)
    } else if args.quiet {
        config.with_level(Level::ERROR)
    } else {
        config
    };

    init_logging(config);
}
