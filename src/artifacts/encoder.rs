//! Categorical label encoder

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Maps a category name to its integer code.
///
/// Codes are positions in `classes`, which is kept sorted so the mapping
/// matches the one fitted at training time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Build an encoder over `classes`, sorting and de-duplicating them.
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut classes: Vec<String> = classes.into_iter().map(Into::into).collect();
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    /// Read an encoder from its JSON form: `{"classes": [...]}`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let raw: Self = serde_json::from_str(&content).map_err(|e| Error::corrupt(path, e))?;
        if raw.classes.is_empty() {
            return Err(Error::corrupt(path, "encoder has no classes"));
        }
        Ok(Self::new(raw.classes))
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Integer code for `label`.
    pub fn transform(&self, label: &str) -> Result<usize> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(label))
            .map_err(|_| Error::UnseenLabel(label.to_string()))
    }
}
