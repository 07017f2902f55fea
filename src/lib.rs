//! Library root for the `oncoscope` crate: tumor-measurement screening
//! built around a pre-trained logistic classifier.

// Core error handling
pub mod errors;

// Feature schema & input surface
pub mod feature_schema;
pub mod feature_vector;

// Classifier artifact & inference
pub mod classifier;
pub mod engine;
pub mod verdict;

// Explanation, history & report export
pub mod explanation;
pub mod history;
pub mod report;

// Offline training pipeline
pub mod dataset;
pub mod training;

// Runtime configuration
pub mod config_loader;

// Session & telemetry
pub mod log_sink;
pub mod session;

// Re-export key types for the predict -> verdict -> history flow
pub use classifier::{Classifier, ClassifierArtifact, StandardScaler, TrainingMetrics};
pub use errors::{InvalidInputError, ScreenError, ScreenResult};
pub use feature_schema::FeatureSchema;
pub use feature_vector::FeatureVector;
pub use history::HistoryLog;
pub use session::ScreeningSession;
pub use verdict::{TumorLabel, Verdict};
