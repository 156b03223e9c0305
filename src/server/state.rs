//! Shared server state

use crate::artifacts::{ArtifactBundle, ArtifactPaths};
use crate::predict::Predictor;
use crate::server::ServerConfig;
use std::sync::Arc;
use tracing::error;

/// State shared by all handlers.
///
/// The model slot holds the startup load result and is never mutated, so
/// handlers read it concurrently without locking.
#[derive(Clone)]
pub struct AppState {
    model: Arc<Result<Predictor, crate::Error>>,
    config: Arc<ServerConfig>,
}

impl AppState {
    /// Wrap an already-computed load result.
    pub fn new(config: ServerConfig, model: Result<Predictor, crate::Error>) -> Self {
        Self { model: Arc::new(model), config: Arc::new(config) }
    }

    /// Load artifacts from `config.artifacts_dir`.
    ///
    /// A load failure is logged and kept; the server still starts.
    pub fn load(config: ServerConfig) -> Self {
        let paths = ArtifactPaths::in_dir(&config.artifacts_dir);
        let model = ArtifactBundle::load(&paths).map(Predictor::new);
        if let Err(e) = &model {
            error!(error = %e, "failed to load model or encoders; predictions disabled");
        }
        Self::new(config, model)
    }

    pub fn model(&self) -> &Result<Predictor, crate::Error> {
        &self.model
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Whether predictions can be served.
    pub fn is_ready(&self) -> bool {
        self.model.is_ok()
    }
}
