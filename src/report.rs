//! Report export: renders the session history into a document.
//!
//! The output is a plain-text document behind a narrow boundary; layout
//! beyond the required content is deliberately unspecified.

use crate::errors::{ScreenError, ScreenResult};
use crate::history::HistoryLog;
use chrono::Utc;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Outcome of a report export.
#[derive(Debug)]
pub struct ReportExport {
    pub path: PathBuf,
    pub entries: usize,
    pub message: String,
}

/// Write the report for `history` next to `output_stem`, suffixing the
/// file name with a UTC timestamp. `explanation` is the narrative for
/// the most recent verdict.
pub fn export_report(
    history: &HistoryLog,
    explanation: &str,
    output_stem: &Path,
) -> ScreenResult<ReportExport> {
    let latest = history
        .last()
        .ok_or_else(|| ScreenError::report("no predictions recorded in this session"))?;

    let timestamp = Utc::now().format("%Y%m%dT%H%M%SZ");
    let full_path = match output_stem.extension() {
        Some(_) => output_stem.to_path_buf(),
        None => PathBuf::from(format!("{}_{timestamp}.txt", output_stem.display())),
    };

    let mut body = String::new();
    body.push_str("Tumor Screening Report\n");
    body.push_str(&format!("Generated: {}\n\n", Utc::now().to_rfc3339()));
    body.push_str(&format!(
        "Latest prediction: {} ({} confidence)\n\n",
        latest.label,
        latest.confidence_percent()
    ));
    body.push_str(explanation);
    body.push_str("\n\nPrediction history:\n");
    for (i, verdict) in history.all().iter().enumerate() {
        body.push_str(&format!(
            "{}. {} - {}\n",
            i + 1,
            verdict.label,
            verdict.confidence_percent()
        ));
    }

    if let Some(parent) = full_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ScreenError::io(format!("create {}", parent.display()), e))?;
        }
    }
    let mut file = File::create(&full_path)
        .map_err(|e| ScreenError::io(format!("create {}", full_path.display()), e))?;
    file.write_all(body.as_bytes())
        .map_err(|e| ScreenError::io(format!("write {}", full_path.display()), e))?;

    Ok(ReportExport {
        path: full_path,
        entries: history.len(),
        message: "Report export successful".to_string(),
    })
}
