//! Error types for artifact loading and inference.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for envios operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading artifacts or running the model.
#[derive(Debug, Error)]
pub enum Error {
    /// A required artifact file does not exist.
    #[error("Archivo {} no encontrado", path.display())]
    ArtifactNotFound { path: PathBuf },

    /// An artifact exists but could not be decoded.
    #[error("Artifact {} is corrupt: {message}", path.display())]
    ArtifactCorrupt { path: PathBuf, message: String },

    /// The model weights do not form a valid network.
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// Model input dimension disagrees with the trained feature columns.
    #[error("Model expects {expected} input features but {actual} trained columns were loaded")]
    SchemaMismatch { expected: usize, actual: usize },

    /// Input batch has the wrong number of columns.
    #[error("Tensor shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch { expected: Vec<usize>, actual: Vec<usize> },

    /// Label encoder was asked for a class it never saw.
    #[error("y contains previously unseen labels: '{0}'")]
    UnseenLabel(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap a decode failure for the artifact at `path`.
    pub fn corrupt(path: impl Into<PathBuf>, message: impl std::fmt::Display) -> Self {
        Self::ArtifactCorrupt { path: path.into(), message: message.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_names_file() {
        let err = Error::ArtifactNotFound { path: PathBuf::from("le_inicio.json") };
        assert_eq!(err.to_string(), "Archivo le_inicio.json no encontrado");
    }

    #[test]
    fn test_corrupt_includes_cause() {
        let err = Error::corrupt("X_train_columns.json", "expected value at line 1");
        let msg = err.to_string();
        assert!(msg.contains("X_train_columns.json"));
        assert!(msg.contains("expected value"));
    }

    #[test]
    fn test_io_from() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
