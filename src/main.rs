//! rustible-utils - Path flattening tools for Rustible
//!
//! This is the main entry point for the rustible-utils CLI.

mod cli;

use anyhow::Result;
use cli::commands::CommandContext;
use cli::output::OutputFormatter;
use cli::{Cli, Commands};
use rustible_utils::config::{Config, LoggingConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Application version information
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    // Parse command line arguments
    let cli = Cli::parse_args();

    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            let output =
                OutputFormatter::new(!cli.no_color, cli.output.unwrap_or_default(), cli.verbosity());
            output.error(&format!("{:#}", e));
            exit_code_for(&e)
        }
    };

    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<i32> {
    // Load configuration
    let config = Config::load(cli.config.as_ref())?;

    // Initialize logging based on verbosity and configuration
    init_logging(cli.verbosity(), &config.logging);
    for warning in &config.warnings {
        tracing::warn!("{}", warning);
    }

    tracing::debug!(version = VERSION, "Starting rustible-utils");

    let ctx = CommandContext::new(cli, config);

    match &cli.command {
        Commands::ToPaths(args) => args.execute(&ctx),
        Commands::GetPath(args) => args.execute(&ctx),
        Commands::Render(args) => args.execute(&ctx),
        Commands::Plugins(args) => args.execute(&ctx),
    }
}

/// Initialize logging based on verbosity level
///
/// `RUST_LOG` wins over `-v`, which wins over the configured level.
fn init_logging(verbosity: u8, logging: &LoggingConfig) {
    let filter = match verbosity {
        0 => logging.level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let registry = tracing_subscriber::registry().with(env_filter);
    if logging.is_json() {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(verbosity >= 3)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Map an error to the process exit code
fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<rustible_utils::Error>())
        .map(rustible_utils::Error::exit_code)
        .unwrap_or(1)
}
