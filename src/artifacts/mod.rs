//! Startup artifacts: model, city encoders, and trained column order.
//!
//! All four files live under one directory with fixed names. They are loaded
//! exactly once; a failure is returned to the caller, which decides whether
//! to keep serving in a degraded state.

mod columns;
mod encoder;

pub use columns::load_columns;
pub use encoder::LabelEncoder;

use crate::features::FeatureSchema;
use crate::model::{load_network, DenseNetwork, Regressor};
use crate::vocabulary::CITIES;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Model weights file name.
pub const MODEL_FILE: &str = "modelo_envios.safetensors";
/// Origin encoder file name.
pub const ORIGIN_ENCODER_FILE: &str = "le_inicio.json";
/// Destination encoder file name.
pub const DESTINATION_ENCODER_FILE: &str = "le_llegada.json";
/// Trained column order file name.
pub const COLUMNS_FILE: &str = "X_train_columns.json";

/// Locations of the four artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub origin_encoder: PathBuf,
    pub destination_encoder: PathBuf,
    pub columns: PathBuf,
}

impl ArtifactPaths {
    /// Standard file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            model: dir.join(MODEL_FILE),
            origin_encoder: dir.join(ORIGIN_ENCODER_FILE),
            destination_encoder: dir.join(DESTINATION_ENCODER_FILE),
            columns: dir.join(COLUMNS_FILE),
        }
    }

    /// All paths, in load order.
    pub fn all(&self) -> [&Path; 4] {
        [
            self.model.as_path(),
            self.origin_encoder.as_path(),
            self.destination_encoder.as_path(),
            self.columns.as_path(),
        ]
    }

    /// Fail with the first path that does not exist.
    pub fn ensure_exist(&self) -> Result<()> {
        for path in self.all() {
            let exists = path.exists();
            info!(file = %path.display(), exists, "checking artifact");
            if !exists {
                return Err(Error::ArtifactNotFound { path: path.to_path_buf() });
            }
        }
        Ok(())
    }
}

/// Everything needed to answer predictions, immutable after load.
#[derive(Debug)]
pub struct ArtifactBundle {
    pub model: DenseNetwork,
    pub origin_encoder: LabelEncoder,
    pub destination_encoder: LabelEncoder,
    pub schema: FeatureSchema,
}

impl ArtifactBundle {
    /// Load and cross-check all artifacts.
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        paths.ensure_exist()?;

        info!(path = %paths.model.display(), "loading model");
        let model = load_network(&paths.model)?;

        info!("loading encoders");
        let origin_encoder = LabelEncoder::from_file(&paths.origin_encoder)?;
        let destination_encoder = LabelEncoder::from_file(&paths.destination_encoder)?;
        let columns = load_columns(&paths.columns)?;

        if model.input_dim() != columns.len() {
            return Err(Error::SchemaMismatch {
                expected: model.input_dim(),
                actual: columns.len(),
            });
        }

        let schema = FeatureSchema::new(columns, &CITIES);
        if !schema.has_weight() {
            warn!("trained columns have no weight column; weight will be ignored");
        }
        if !schema.missing_origin().is_empty() {
            warn!(
                cities = ?schema.missing_origin(),
                "origin cities without a trained column encode as all zeros"
            );
        }
        if !schema.missing_destination().is_empty() {
            warn!(
                cities = ?schema.missing_destination(),
                "destination cities without a trained column encode as all zeros"
            );
        }

        info!(
            model = model.name(),
            layers = model.layers().len(),
            params = model.param_count(),
            features = schema.len(),
            "model and encoders loaded"
        );

        Ok(Self { model, origin_encoder, destination_encoder, schema })
    }
}
