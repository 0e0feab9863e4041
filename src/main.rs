//! dpkg-builder main entry point
//!
//! This is the command-line interface for fetching Debian source packages.

use clap::{Parser, Subcommand};
use dpkg_builder::commands;
use dpkg_builder::config::load_or_default;
use dpkg_builder::Result;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// dpkg-builder: Build a package from debian-testing
///
/// Looks up a package's index page, downloads its source artifacts
/// (.dsc, .orig.tar.*, .debian.tar.xz) into a directory named after the
/// package and unpacks them with dpkg-source.
#[derive(Parser, Debug)]
#[command(name = "dpkg-builder")]
#[command(version = "0.0.1")]
#[command(about = "Build a package from debian-testing", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, global = true, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download and build the package
    Build {
        #[arg(value_name = "PACKAGE")]
        package: Option<String>,
    },

    /// Only download the package files
    Fetch {
        #[arg(value_name = "PACKAGE")]
        package: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Errors are logged once here; returning them would print them again
    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:?} error: {}", e.kind(), e);
            ExitCode::FAILURE
        }
    }
}

/// Loads the configuration and dispatches the subcommand
async fn run(cli: &Cli) -> Result<()> {
    let config = load_or_default(cli.config.as_deref())?;

    match &cli.command {
        Command::Build { package } => commands::build(package.as_deref()),
        Command::Fetch { package } => {
            let source = commands::fetch(package.as_deref(), &config).await?;
            tracing::info!("Fetched {}", source.name());
            Ok(())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("dpkg_builder=info,warn"),
            1 => EnvFilter::new("dpkg_builder=debug,info"),
            2 => EnvFilter::new("dpkg_builder=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
