//! Serialized classifier artifact and its inference contract.
//!
//! The artifact carries the whole fitted pipeline: per-feature
//! standardization followed by logistic-regression coefficients. It is
//! loaded once at startup and read-only afterwards.

use crate::errors::{ScreenError, ScreenResult};
use crate::verdict::{CLASS_BENIGN, CLASS_MALIGNANT};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Per-feature standardization fitted on the training partition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub means: Vec<f64>,
    pub stds: Vec<f64>,
}

impl StandardScaler {
    /// Transform one row into standardized space. A zero-variance
    /// column maps to 0.0 rather than dividing by zero.
    pub fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.means.iter().zip(self.stds.iter()))
            .map(|(x, (mean, std))| {
                if *std > f64::EPSILON {
                    (x - mean) / std
                } else {
                    0.0
                }
            })
            .collect()
    }
}

/// Held-out diagnostics recorded by the trainer. Rows are
/// `confusion[actual][predicted]` under the malignant=0, benign=1
/// convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingMetrics {
    pub accuracy: f64,
    pub confusion: [[usize; 2]; 2],
    pub train_rows: usize,
    pub test_rows: usize,
}

/// On-disk JSON form of a fitted pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    pub model_id: String,
    pub version: String,
    pub trained_at: DateTime<Utc>,
    pub feature_names: Vec<String>,
    pub scaler: StandardScaler,
    pub weights: Vec<f64>,
    pub bias: f64,
    #[serde(default)]
    pub metrics: Option<TrainingMetrics>,
}

/// Loaded classifier. Wraps the artifact behind the two-operation
/// contract the runtime consumes: class prediction and class
/// probabilities.
#[derive(Debug)]
pub struct Classifier {
    artifact: ClassifierArtifact,
}

impl Classifier {
    /// Validate internal consistency of an artifact and wrap it.
    pub fn from_artifact(artifact: ClassifierArtifact) -> ScreenResult<Self> {
        let arity = artifact.feature_names.len();
        if arity == 0 {
            return Err(ScreenError::config("artifact declares no features"));
        }
        if artifact.weights.len() != arity
            || artifact.scaler.means.len() != arity
            || artifact.scaler.stds.len() != arity
        {
            return Err(ScreenError::config(format!(
                "artifact '{}' is inconsistent: {} features, {} weights, {} scaler columns",
                artifact.model_id,
                arity,
                artifact.weights.len(),
                artifact.scaler.means.len(),
            )));
        }
        Ok(Classifier { artifact })
    }

    /// Load the artifact from disk. A missing or unreadable file is
    /// [`ScreenError::ModelUnavailable`], detected before first use.
    pub fn load(path: &Path) -> ScreenResult<Self> {
        let raw = fs::read_to_string(path).map_err(|source| ScreenError::ModelUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: ClassifierArtifact = serde_json::from_str(&raw)
            .map_err(|e| ScreenError::artifact(format!("parsing {}", path.display()), e))?;
        Self::from_artifact(artifact)
    }

    pub fn expected_arity(&self) -> usize {
        self.artifact.feature_names.len()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.artifact.feature_names
    }

    pub fn model_id(&self) -> &str {
        &self.artifact.model_id
    }

    pub fn artifact(&self) -> &ClassifierArtifact {
        &self.artifact
    }

    /// Class probabilities `[p_malignant, p_benign]` for one row.
    pub fn predict_proba(&self, row: &[f64]) -> [f64; 2] {
        let standardized = self.artifact.scaler.transform(row);
        let z = self.artifact.bias
            + standardized
                .iter()
                .zip(self.artifact.weights.iter())
                .map(|(x, w)| x * w)
                .sum::<f64>();
        let p_benign = sigmoid(z);
        [1.0 - p_benign, p_benign]
    }

    /// Predicted class index, tie broken toward benign.
    pub fn predict(&self, row: &[f64]) -> usize {
        let probabilities = self.predict_proba(row);
        if probabilities[CLASS_BENIGN] >= probabilities[CLASS_MALIGNANT] {
            CLASS_BENIGN
        } else {
            CLASS_MALIGNANT
        }
    }
}

/// Numerically stable logistic function.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact_with(weights: Vec<f64>, bias: f64) -> ClassifierArtifact {
        let arity = weights.len();
        ClassifierArtifact {
            model_id: "unit_test_model".into(),
            version: "v1".into(),
            trained_at: Utc::now(),
            feature_names: (0..arity).map(|i| format!("f{i}")).collect(),
            scaler: StandardScaler {
                means: vec![0.0; arity],
                stds: vec![1.0; arity],
            },
            weights,
            bias,
            metrics: None,
        }
    }

    #[test]
    fn probabilities_sum_to_one() {
        let clf = Classifier::from_artifact(artifact_with(vec![0.5, -0.25], 0.1)).unwrap();
        let p = clf.predict_proba(&[1.0, 2.0]);
        assert!((p[0] + p[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_logit_predicts_benign() {
        let clf = Classifier::from_artifact(artifact_with(vec![0.0, 0.0], 0.0)).unwrap();
        let p = clf.predict_proba(&[3.0, 4.0]);
        assert_eq!(p, [0.5, 0.5]);
        assert_eq!(clf.predict(&[3.0, 4.0]), CLASS_BENIGN);
    }

    #[test]
    fn scaler_centers_and_scales() {
        let scaler = StandardScaler {
            means: vec![10.0, 100.0],
            stds: vec![2.0, 0.0],
        };
        assert_eq!(scaler.transform(&[14.0, 250.0]), vec![2.0, 0.0]);
    }

    #[test]
    fn inconsistent_artifact_rejected() {
        let mut artifact = artifact_with(vec![0.1, 0.2], 0.0);
        artifact.weights.push(0.3);
        assert!(Classifier::from_artifact(artifact).is_err());
    }

    #[test]
    fn missing_file_is_model_unavailable() {
        let err = Classifier::load(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(matches!(err, ScreenError::ModelUnavailable { .. }));
    }

    #[test]
    fn sigmoid_is_stable_at_extremes() {
        assert!(sigmoid(800.0) > 0.999999);
        assert!(sigmoid(-800.0) < 1e-6);
        assert_eq!(sigmoid(0.0), 0.5);
    }
}
