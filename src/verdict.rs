//! Classifier output for one feature vector.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Class-index convention of the diagnostic dataset: malignant = 0,
/// benign = 1.
pub const CLASS_MALIGNANT: usize = 0;
pub const CLASS_BENIGN: usize = 1;

/// Predicted class label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TumorLabel {
    Malignant,
    Benign,
}

impl TumorLabel {
    /// Argmax over `[p_malignant, p_benign]`, tie broken toward benign.
    pub fn from_probabilities(probabilities: &[f64; 2]) -> Self {
        if probabilities[CLASS_BENIGN] >= probabilities[CLASS_MALIGNANT] {
            TumorLabel::Benign
        } else {
            TumorLabel::Malignant
        }
    }

    pub fn class_index(&self) -> usize {
        match self {
            TumorLabel::Malignant => CLASS_MALIGNANT,
            TumorLabel::Benign => CLASS_BENIGN,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TumorLabel::Malignant => "MALIGNANT",
            TumorLabel::Benign => "BENIGN",
        }
    }
}

impl fmt::Display for TumorLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One prediction outcome. Confidence keeps full precision; the
/// percentage helpers round to two decimals for display only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub label: TumorLabel,
    pub confidence: f64,
    pub probabilities: [f64; 2],
    pub model_id: String,
}

impl Verdict {
    pub fn new(probabilities: [f64; 2], model_id: &str) -> Self {
        let label = TumorLabel::from_probabilities(&probabilities);
        Verdict {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            label,
            confidence: probabilities[label.class_index()],
            probabilities,
            model_id: model_id.to_string(),
        }
    }

    /// Confidence as a display percentage, e.g. `97.12%`.
    pub fn confidence_percent(&self) -> String {
        format_percent(self.confidence)
    }

    pub fn malignant_percent(&self) -> String {
        format_percent(self.probabilities[CLASS_MALIGNANT])
    }

    pub fn benign_percent(&self) -> String {
        format_percent(self.probabilities[CLASS_BENIGN])
    }
}

fn format_percent(p: f64) -> String {
    format!("{:.2}%", p * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_follows_class_convention() {
        assert_eq!(
            TumorLabel::from_probabilities(&[0.8, 0.2]),
            TumorLabel::Malignant
        );
        assert_eq!(
            TumorLabel::from_probabilities(&[0.3, 0.7]),
            TumorLabel::Benign
        );
    }

    #[test]
    fn tie_breaks_toward_benign() {
        assert_eq!(
            TumorLabel::from_probabilities(&[0.5, 0.5]),
            TumorLabel::Benign
        );
    }

    #[test]
    fn confidence_is_max_probability() {
        let v = Verdict::new([0.9, 0.1], "test_model");
        assert_eq!(v.label, TumorLabel::Malignant);
        assert_eq!(v.confidence, 0.9);
        assert_eq!(v.confidence_percent(), "90.00%");
    }

    #[test]
    fn percent_rounds_to_two_decimals() {
        let v = Verdict::new([0.028849, 0.971151], "test_model");
        assert_eq!(v.confidence_percent(), "97.12%");
        assert_eq!(v.malignant_percent(), "2.88%");
    }
}
