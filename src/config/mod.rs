//! CLI arguments and server configuration resolution
//!
//! Settings are layered, lowest precedence first: built-in defaults, the
//! YAML file given with `--config`, the `PORT` environment variable, then
//! explicit flags.
//!
//! ```bash
//! envios serve
//! envios serve --port 8080 --artifacts-dir /srv/modelos
//! envios serve --config envios.yaml
//! envios check --artifacts-dir /srv/modelos
//! ```

mod args;

pub use args::{parse_args, CheckArgs, Cli, Command, ServeArgs};

use crate::server::{self, ServerConfig};
use std::path::Path;

fn base_config(config: Option<&Path>) -> server::Result<ServerConfig> {
    match config {
        Some(path) => ServerConfig::from_yaml_file(path),
        None => Ok(ServerConfig::default()),
    }
}

/// Resolve the server configuration for `serve`.
pub fn resolve_serve_config(args: &ServeArgs) -> server::Result<ServerConfig> {
    let mut config = base_config(args.config.as_deref())?;
    if let Some(host) = args.host {
        config = config.with_host(host);
    }
    if let Some(port) = args.port {
        config = config.with_port(port);
    }
    if let Some(dir) = &args.artifacts_dir {
        config = config.with_artifacts_dir(dir);
    }
    if args.no_cors {
        config = config.without_cors();
    }
    Ok(config)
}

/// Resolve the server configuration for `check`.
pub fn resolve_check_config(args: &CheckArgs) -> server::Result<ServerConfig> {
    let mut config = base_config(args.config.as_deref())?;
    if let Some(dir) = &args.artifacts_dir {
        config = config.with_artifacts_dir(dir);
    }
    Ok(config)
}
