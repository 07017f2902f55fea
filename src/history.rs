//! Append-only record of the session's verdicts.

use crate::verdict::{TumorLabel, Verdict};

/// In-memory prediction history. Insertion order is chronological
/// order; entries are never removed or deduplicated. Lifetime is one
/// session, single writer by construction.
#[derive(Debug, Default)]
pub struct HistoryLog {
    verdicts: Vec<Verdict>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, verdict: Verdict) {
        self.verdicts.push(verdict);
    }

    /// Read-only chronological view.
    pub fn all(&self) -> &[Verdict] {
        &self.verdicts
    }

    pub fn last(&self) -> Option<&Verdict> {
        self.verdicts.last()
    }

    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    /// Chronological 0/1 projection for the history chart:
    /// malignant = 0, benign = 1.
    pub fn chart_series(&self) -> Vec<u8> {
        self.verdicts
            .iter()
            .map(|v| match v.label {
                TumorLabel::Malignant => 0,
                TumorLabel::Benign => 1,
            })
            .collect()
    }

    /// Plain-text chart rendering, one row per prediction.
    pub fn render_chart(&self) -> String {
        if self.verdicts.is_empty() {
            return "No predictions yet.".to_string();
        }
        let mut out = String::from("  #  value  label\n");
        for (i, verdict) in self.verdicts.iter().enumerate() {
            let value = match verdict.label {
                TumorLabel::Malignant => 0,
                TumorLabel::Benign => 1,
            };
            out.push_str(&format!(
                "{:>3}  {}      {}\n",
                i + 1,
                value,
                verdict.label
            ));
        }
        out
    }
}
