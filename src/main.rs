//! Envios CLI
//!
//! # Usage
//!
//! ```bash
//! # Serve on 0.0.0.0:$PORT (default 5000) with artifacts from the working directory
//! envios serve
//!
//! # Serve with explicit settings
//! envios serve --port 8080 --artifacts-dir /srv/modelos
//!
//! # Verify the artifacts load
//! envios check --artifacts-dir /srv/modelos
//! ```

use clap::Parser;
use envios::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
