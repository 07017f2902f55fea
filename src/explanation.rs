//! Deterministic, templated narrative for a verdict.
//!
//! This is presentation text only. The per-feature lines state that a
//! measurement influenced the decision without computing any
//! attribution, and must stay that way.

use crate::verdict::{TumorLabel, Verdict};

/// Fixed response when an explanation is requested before any
/// prediction was made.
pub const NO_PREDICTION_MESSAGE: &str = "Please make a prediction first.";

/// Render the canned narrative for a verdict: resembled class, both
/// class confidences (predicted class first), the non-diagnosis
/// disclaimer and a recommendation.
///
/// `feature_names` adds one cosmetic line per measurement; pass an
/// empty slice to omit the detail block.
pub fn explain(verdict: &Verdict, feature_names: &[String]) -> String {
    let mut text = match verdict.label {
        TumorLabel::Malignant => format!(
            "The model noticed patterns that are more commonly associated \
             with malignant tumors.\n\n\
             Confidence level:\n\
             Malignant: {}\n\
             Benign: {}\n\n\
             This does NOT mean a confirmed diagnosis. It simply means the \
             measurements resemble patterns that often require further \
             medical evaluation.\n\n\
             Recommendation:\n\
             It would be wise to consult a medical professional for proper \
             clinical testing and reassurance.",
            verdict.malignant_percent(),
            verdict.benign_percent(),
        ),
        TumorLabel::Benign => format!(
            "The model noticed patterns that are more commonly associated \
             with benign (non-dangerous) tumors.\n\n\
             Confidence level:\n\
             Benign: {}\n\
             Malignant: {}\n\n\
             This suggests the measurements look similar to cases that were \
             non-cancerous in the training data.\n\n\
             Recommendation:\n\
             Regular checkups are always a good practice, but this result \
             appears reassuring.",
            verdict.benign_percent(),
            verdict.malignant_percent(),
        ),
    };

    if !feature_names.is_empty() {
        text.push_str("\n\nMeasurement detail:");
        for name in feature_names {
            text.push_str(&format!("\n- {name} influenced the decision"));
        }
    }

    text
}
