//! CLI module for envios
//!
//! This module contains the command handlers and logging setup.

mod commands;
mod logging;

pub use commands::run_command;
pub use logging::{init_tracing, LogLevel, LOG_ENV};

// Re-export Cli from config for convenience
pub use crate::config::Cli;
