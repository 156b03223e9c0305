//! CLI command implementations

mod check;
mod serve;

use crate::cli::{init_tracing, LogLevel};
use crate::config::{Cli, Command};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    // Configure output based on verbose/quiet flags
    let log_level = if cli.quiet {
        LogLevel::Quiet
    } else if cli.verbose {
        LogLevel::Verbose
    } else {
        LogLevel::Normal
    };
    init_tracing(log_level);

    match cli.command {
        Command::Serve(args) => serve::run_serve(args, log_level),
        Command::Check(args) => check::run_check(args, log_level),
    }
}
