//! Command-line arguments

use clap::{Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

/// Envios: shipping price estimation service
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "envios")]
#[command(version)]
#[command(about = "Estimate shipping prices from package weight and origin/destination city")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Serve the price form and the prediction endpoint
    Serve(ServeArgs),

    /// Load the artifacts and report what the model expects
    Check(CheckArgs),
}

/// Arguments for the serve command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ServeArgs {
    /// YAML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Interface to bind
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// TCP port to bind
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Directory containing the model, encoders, and column list
    #[arg(short, long, value_name = "DIR")]
    pub artifacts_dir: Option<PathBuf>,

    /// Disable cross-origin requests
    #[arg(long)]
    pub no_cors: bool,
}

/// Arguments for the check command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct CheckArgs {
    /// YAML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory containing the model, encoders, and column list
    #[arg(short, long, value_name = "DIR")]
    pub artifacts_dir: Option<PathBuf>,
}

/// Parse arguments from an iterator (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
