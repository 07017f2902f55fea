//! Screening session: owns the loaded classifier, the history log and
//! the last verdict for one interactive run.
//!
//! This replaces process-global state with an explicitly constructed
//! object whose lifetime bounds the HistoryLog. Execution is
//! single-threaded and synchronous; the session is the only writer.

use crate::classifier::Classifier;
use crate::config_loader::ScreenerConfig;
use crate::engine;
use crate::errors::{ScreenError, ScreenResult};
use crate::explanation::{self, NO_PREDICTION_MESSAGE};
use crate::feature_schema::FeatureSchema;
use crate::feature_vector::FeatureVector;
use crate::history::HistoryLog;
use crate::log_sink::LogEvent;
use crate::report::{self, ReportExport};
use crate::verdict::Verdict;
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug)]
pub struct ScreeningSession {
    pub session_id: String,
    pub started_at: DateTime<Utc>,
    classifier: Arc<Classifier>,
    schema: FeatureSchema,
    history: HistoryLog,
    last_verdict: Option<Verdict>,
    telemetry_path: Option<PathBuf>,
    explanation_enabled: bool,
}

impl ScreeningSession {
    /// Build a session around an already-loaded classifier. The schema
    /// arity must match the artifact arity; this is checked here, once,
    /// so prediction calls cannot hit a drifted deployment.
    pub fn new(classifier: Arc<Classifier>, schema: FeatureSchema) -> ScreenResult<Self> {
        if schema.arity() != classifier.expected_arity() {
            return Err(ScreenError::config(format!(
                "feature set expects {} measurements but artifact '{}' was trained on {}",
                schema.arity(),
                classifier.model_id(),
                classifier.expected_arity(),
            )));
        }

        Ok(ScreeningSession {
            session_id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            classifier,
            schema,
            history: HistoryLog::new(),
            last_verdict: None,
            telemetry_path: None,
            explanation_enabled: true,
        })
    }

    /// Load the artifact named by `config` and assemble the session.
    /// A missing artifact fails here, before any interaction.
    pub fn from_config(config: &ScreenerConfig) -> ScreenResult<Self> {
        let schema = config.schema()?;
        let classifier = Arc::new(Classifier::load(Path::new(&config.model_path))?);
        info!(
            "loaded classifier '{}' ({} features) from {}",
            classifier.model_id(),
            classifier.expected_arity(),
            config.model_path,
        );

        let mut session = Self::new(classifier, schema)?;
        session.explanation_enabled = config.explanation_enabled;
        if config.telemetry_enabled {
            session.telemetry_path = Some(Path::new(&config.log_dir).join("predictions.log"));
        }
        Ok(session)
    }

    pub fn with_telemetry(mut self, path: PathBuf) -> Self {
        self.telemetry_path = Some(path);
        self
    }

    pub fn set_explanation_enabled(&mut self, enabled: bool) {
        self.explanation_enabled = enabled;
    }

    /// Validate one raw input line and predict. On validation failure
    /// nothing is constructed and the session is untouched.
    pub fn predict_line(&mut self, raw: &str) -> ScreenResult<Verdict> {
        let features = FeatureVector::parse(raw, &self.schema)?;
        self.predict(features)
    }

    /// Run one prediction and record the verdict.
    pub fn predict(&mut self, features: FeatureVector) -> ScreenResult<Verdict> {
        let verdict = engine::predict(&features, &self.classifier)?;

        info!(
            "prediction {}: {} ({})",
            self.history.len() + 1,
            verdict.label,
            verdict.confidence_percent(),
        );
        if let Some(path) = &self.telemetry_path {
            let event = LogEvent::new(
                "session",
                "prediction",
                format!(
                    "{} scored {:.4} by {}",
                    verdict.label, verdict.confidence, verdict.model_id
                ),
            );
            // Telemetry must never fail a prediction.
            if let Err(e) = event.write_to(path) {
                debug!("telemetry write failed: {e}");
            }
        }

        self.history.append(verdict.clone());
        self.last_verdict = Some(verdict.clone());
        Ok(verdict)
    }

    /// Narrative for the most recent verdict, or the fixed message when
    /// none exists yet. Never fails.
    pub fn explain_last(&self) -> String {
        match &self.last_verdict {
            None => NO_PREDICTION_MESSAGE.to_string(),
            Some(verdict) => {
                let names: &[String] = if self.explanation_enabled {
                    self.schema.names()
                } else {
                    &[]
                };
                explanation::explain(verdict, names)
            }
        }
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn chart(&self) -> String {
        self.history.render_chart()
    }

    /// Export the session report next to `output_stem`.
    pub fn export_report(&self, output_stem: &Path) -> ScreenResult<ReportExport> {
        if self.last_verdict.is_none() {
            return Err(ScreenError::report("no predictions recorded in this session"));
        }
        report::export_report(&self.history, &self.explain_last(), output_stem)
    }

    /// Session status snapshot.
    pub fn status(&self) -> serde_json::Value {
        serde_json::json!({
            "session_id": self.session_id,
            "started_at": self.started_at.to_rfc3339(),
            "model_id": self.classifier.model_id(),
            "feature_arity": self.schema.arity(),
            "predictions": self.history.len(),
            "telemetry_enabled": self.telemetry_path.is_some(),
            "explanation_enabled": self.explanation_enabled,
        })
    }
}
