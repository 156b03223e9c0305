//! Serve command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{resolve_serve_config, ServeArgs};
use crate::server::{self, AppState};
use tracing::info;

/// Load artifacts and run the HTTP server until interrupted.
pub fn run_serve(args: ServeArgs, level: LogLevel) -> Result<(), String> {
    let config = resolve_serve_config(&args).map_err(|e| e.to_string())?;
    info!(
        address = %config.address,
        artifacts_dir = %config.artifacts_dir.display(),
        cors = config.cors_enabled,
        "starting envios"
    );

    // Artifacts load once, before any connection is accepted
    let state = AppState::load(config);
    if !state.is_ready() {
        log(level, LogLevel::Normal, "Warning: model not loaded; /predict will answer 500");
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start runtime: {e}"))?;

    runtime.block_on(server::serve(state)).map_err(|e| e.to_string())
}
