//! Feature encoding aligned to the trained column order.
//!
//! The model was trained on `[Peso, Inicio_<city>..., Llegada_<city>...]` in a
//! fixed order. [`FeatureSchema`] resolves, once at load time, where weight and
//! each city's one-hot indicator live in that order, so encoding a request is a
//! zero-filled vector with at most three positions set.
//!
//! A vocabulary city that has no trained column yields an all-zero block on
//! that side. The model still answers, but the price ignores the city; such
//! cities are reported by [`FeatureSchema::missing_origin`] and
//! [`FeatureSchema::missing_destination`] so the mismatch is visible at startup.

use std::collections::HashMap;

/// Column holding the package weight.
pub const WEIGHT_COLUMN: &str = "Peso";

/// Prefix of origin one-hot columns.
pub const ORIGIN_PREFIX: &str = "Inicio_";

/// Prefix of destination one-hot columns.
pub const DESTINATION_PREFIX: &str = "Llegada_";

/// Precomputed mapping from request fields to feature-vector positions.
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    columns: Vec<String>,
    weight_index: Option<usize>,
    origin: HashMap<String, usize>,
    destination: HashMap<String, usize>,
    missing_origin: Vec<String>,
    missing_destination: Vec<String>,
}

impl FeatureSchema {
    /// Resolve column positions for every city in `vocabulary`.
    pub fn new(columns: Vec<String>, vocabulary: &[&str]) -> Self {
        let index: HashMap<&str, usize> =
            columns.iter().enumerate().map(|(i, c)| (c.as_str(), i)).collect();

        let resolve = |prefix: &str| {
            let mut found = HashMap::new();
            let mut missing = Vec::new();
            for city in vocabulary {
                match index.get(format!("{prefix}{city}").as_str()) {
                    Some(&i) => {
                        found.insert((*city).to_string(), i);
                    }
                    None => missing.push((*city).to_string()),
                }
            }
            (found, missing)
        };

        let (origin, missing_origin) = resolve(ORIGIN_PREFIX);
        let (destination, missing_destination) = resolve(DESTINATION_PREFIX);
        let weight_index = index.get(WEIGHT_COLUMN).copied();

        Self { columns, weight_index, origin, destination, missing_origin, missing_destination }
    }

    /// Trained column names, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Feature vector length.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Whether the trained columns include the weight column.
    pub fn has_weight(&self) -> bool {
        self.weight_index.is_some()
    }

    /// Vocabulary cities with no `Inicio_` column.
    pub fn missing_origin(&self) -> &[String] {
        &self.missing_origin
    }

    /// Vocabulary cities with no `Llegada_` column.
    pub fn missing_destination(&self) -> &[String] {
        &self.missing_destination
    }

    /// Build the feature vector for one shipment.
    pub fn encode(&self, weight: f64, origin: &str, destination: &str) -> Vec<f32> {
        let mut features = vec![0.0f32; self.columns.len()];
        if let Some(i) = self.weight_index {
            features[i] = weight as f32;
        }
        if let Some(&i) = self.origin.get(origin) {
            features[i] = 1.0;
        }
        if let Some(&i) = self.destination.get(destination) {
            features[i] = 1.0;
        }
        features
    }

    /// Non-zero entries of `features` with their column names.
    pub fn active_columns<'a>(&'a self, features: &[f32]) -> Vec<(&'a str, f32)> {
        self.columns
            .iter()
            .zip(features)
            .filter(|(_, &v)| v != 0.0)
            .map(|(c, &v)| (c.as_str(), v))
            .collect()
    }
}
