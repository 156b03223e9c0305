//! Trained feature-column order

use crate::{Error, Result};
use std::collections::HashSet;
use std::path::Path;

/// Read the ordered column names the model was trained on.
///
/// The file is a JSON array of strings. Empty lists and duplicate names are
/// rejected since either would make the feature layout ambiguous.
pub fn load_columns(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let columns: Vec<String> = serde_json::from_str(&content).map_err(|e| Error::corrupt(path, e))?;

    if columns.is_empty() {
        return Err(Error::corrupt(path, "column list is empty"));
    }
    let mut seen = HashSet::new();
    if let Some(dup) = columns.iter().find(|c| !seen.insert(c.as_str())) {
        return Err(Error::corrupt(path, format!("duplicate column '{dup}'")));
    }

    Ok(columns)
}
