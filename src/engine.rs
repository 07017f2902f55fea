//! Pure prediction step: feature vector + classifier -> verdict.

use crate::classifier::Classifier;
use crate::errors::InvalidInputError;
use crate::feature_vector::FeatureVector;
use crate::verdict::Verdict;

/// Run one prediction. Pure over its inputs: no session state is
/// touched, the classifier is read-only.
///
/// The arity guard is re-checked here so the engine holds its own
/// contract even when called with a vector built against a different
/// schema than the loaded artifact.
pub fn predict(
    features: &FeatureVector,
    classifier: &Classifier,
) -> Result<Verdict, InvalidInputError> {
    if features.len() != classifier.expected_arity() {
        return Err(InvalidInputError::WrongArity {
            expected: classifier.expected_arity(),
            actual: features.len(),
        });
    }

    let probabilities = classifier.predict_proba(features.values());
    Ok(Verdict::new(probabilities, classifier.model_id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{ClassifierArtifact, StandardScaler};
    use crate::feature_schema::FeatureSchema;
    use crate::verdict::TumorLabel;
    use chrono::Utc;

    fn two_feature_classifier() -> Classifier {
        Classifier::from_artifact(ClassifierArtifact {
            model_id: "engine_test".into(),
            version: "v1".into(),
            trained_at: Utc::now(),
            feature_names: vec!["mean_radius".into(), "mean_area".into()],
            scaler: StandardScaler {
                means: vec![14.0, 650.0],
                stds: vec![3.5, 350.0],
            },
            weights: vec![-1.5, -1.2],
            bias: 0.3,
            metrics: None,
        })
        .unwrap()
    }

    fn schema() -> FeatureSchema {
        FeatureSchema::from_names(vec!["mean_radius".into(), "mean_area".into()]).unwrap()
    }

    #[test]
    fn arity_mismatch_rejected_before_inference() {
        let clf = two_feature_classifier();
        let wide = FeatureSchema::core5();
        let fv = FeatureVector::parse("1,2,3,4,5", &wide).unwrap();
        let err = predict(&fv, &clf).unwrap_err();
        assert_eq!(
            err,
            InvalidInputError::WrongArity {
                expected: 2,
                actual: 5
            }
        );
    }

    #[test]
    fn prediction_is_deterministic() {
        let clf = two_feature_classifier();
        let fv = FeatureVector::parse("22.5, 1800.0", &schema()).unwrap();

        let a = predict(&fv, &clf).unwrap();
        let b = predict(&fv, &clf).unwrap();

        assert_eq!(a.label, b.label);
        assert_eq!(a.confidence.to_bits(), b.confidence.to_bits());
        assert_eq!(a.probabilities[0].to_bits(), b.probabilities[0].to_bits());
    }

    #[test]
    fn large_measurements_score_malignant() {
        let clf = two_feature_classifier();
        let fv = FeatureVector::parse("25.0, 2000.0", &schema()).unwrap();
        let verdict = predict(&fv, &clf).unwrap();
        assert_eq!(verdict.label, TumorLabel::Malignant);
        assert!(verdict.confidence > 0.5);
    }
}
