//! Feature schema shared between training and inference.
//!
//! The schema pins the arity and the column names, so the trainer and
//! the runtime cannot drift apart on which measurements they expect.

use crate::errors::{ScreenError, ScreenResult};
use serde::{Deserialize, Serialize};

/// Column names of the Wisconsin diagnostic dataset, in dataset order:
/// the ten mean measurements, their standard errors, then worst values.
pub const WDBC_FEATURE_NAMES: [&str; 30] = [
    "mean_radius",
    "mean_texture",
    "mean_perimeter",
    "mean_area",
    "mean_smoothness",
    "mean_compactness",
    "mean_concavity",
    "mean_concave_points",
    "mean_symmetry",
    "mean_fractal_dimension",
    "radius_se",
    "texture_se",
    "perimeter_se",
    "area_se",
    "smoothness_se",
    "compactness_se",
    "concavity_se",
    "concave_points_se",
    "symmetry_se",
    "fractal_dimension_se",
    "worst_radius",
    "worst_texture",
    "worst_perimeter",
    "worst_area",
    "worst_smoothness",
    "worst_compactness",
    "worst_concavity",
    "worst_concave_points",
    "worst_symmetry",
    "worst_fractal_dimension",
];

/// Ordered feature columns for one deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    /// The five mean-value columns used by the compact entry form.
    pub fn core5() -> Self {
        Self::from_slice(&WDBC_FEATURE_NAMES[..5])
    }

    /// All thirty dataset columns.
    pub fn full30() -> Self {
        Self::from_slice(&WDBC_FEATURE_NAMES)
    }

    fn from_slice(names: &[&str]) -> Self {
        FeatureSchema {
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    /// Build a schema from explicit column names.
    pub fn from_names(names: Vec<String>) -> ScreenResult<Self> {
        if names.is_empty() {
            return Err(ScreenError::config("feature schema cannot be empty"));
        }
        Ok(FeatureSchema { names })
    }

    /// Resolve a configured feature-set key. Comma-separated column
    /// names are accepted alongside the two named sets.
    pub fn from_config_key(key: &str) -> ScreenResult<Self> {
        match key.trim() {
            "core5" => Ok(Self::core5()),
            "full30" => Ok(Self::full30()),
            other if other.contains(',') => {
                Self::from_names(other.split(',').map(|n| n.trim().to_string()).collect())
            }
            other => Err(ScreenError::config(format!(
                "unknown feature set '{other}' (expected core5, full30, or a column list)"
            ))),
        }
    }

    pub fn arity(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}
