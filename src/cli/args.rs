//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// gencache - generation-scoped caching proxy for app shells
///
/// Pre-populates a versioned cache generation from an asset manifest,
/// serves requests cache-first (local) or network-first (external), and
/// garbage-collects old generations on activation.
#[derive(Parser, Debug)]
#[command(name = "gencache")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "GENCACHE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install and activate the configured cache generation
    Deploy,

    /// Run one request through the policy engine
    Fetch(FetchArgs),

    /// Delete every cache generation
    Clear,

    /// Show cache generations and lifecycle info
    Status,

    /// Show configuration
    Config(ConfigArgs),
}

/// Arguments for the fetch command
#[derive(Parser, Debug)]
pub struct FetchArgs {
    /// URL to fetch (relative URLs resolve against the site origin)
    pub url: String,

    /// Write the response body to a file instead of summarizing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Config action to perform
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommand actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Display current configuration
    Show,

    /// Show the config file path
    Path,
}
