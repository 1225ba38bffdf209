//! gencache - generation-scoped caching proxy
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use gencache::cli::{Cli, Commands};
use gencache::config::ConfigManager;
use gencache::error::GencacheResult;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> GencacheResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("gencache=warn"),
        1 => EnvFilter::new("gencache=info"),
        _ => EnvFilter::new("gencache=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Load configuration
    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };
    let config = config_manager.load().await?;

    // Dispatch to command
    match cli.command {
        Commands::Deploy => gencache::cli::commands::deploy(&config).await,
        Commands::Fetch(args) => gencache::cli::commands::fetch(args, &config).await,
        Commands::Clear => gencache::cli::commands::clear(&config).await,
        Commands::Status => gencache::cli::commands::status(&config).await,
        Commands::Config(args) => {
            gencache::cli::commands::config(args, &config, &config_manager).await
        }
    }
}
