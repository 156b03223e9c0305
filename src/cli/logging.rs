//! Logging setup for CLI commands

use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding a tracing filter, e.g. `envios=debug`.
pub const LOG_ENV: &str = "ENVIOS_LOG";

static INIT: Once = Once::new();

/// Log level for CLI output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Suppress all output
    Quiet,
    /// Normal output level
    Normal,
    /// Verbose output with additional details
    Verbose,
}

impl LogLevel {
    /// Filter used when `ENVIOS_LOG` is unset or invalid.
    pub fn default_filter(self) -> &'static str {
        match self {
            Self::Quiet => "envios=warn,tower_http=warn",
            Self::Normal => "envios=info,tower_http=info",
            Self::Verbose => "envios=debug,tower_http=debug",
        }
    }
}

/// Print a message if the current level permits it
pub fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level != LogLevel::Quiet && (level == required || required == LogLevel::Normal) {
        println!("{msg}");
    }
}

/// Install the global tracing subscriber. Later calls are no-ops.
pub fn init_tracing(level: LogLevel) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(level.default_filter()));

        // A host process may already own the global subscriber
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filters() {
        assert!(LogLevel::Quiet.default_filter().contains("envios=warn"));
        assert!(LogLevel::Normal.default_filter().contains("envios=info"));
        assert!(LogLevel::Verbose.default_filter().contains("envios=debug"));
    }

    #[test]
    fn test_init_twice_is_safe() {
        init_tracing(LogLevel::Quiet);
        init_tracing(LogLevel::Verbose);
    }
}
