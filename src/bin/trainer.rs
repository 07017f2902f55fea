// Offline trainer: fit the standardize + logistic-regression pipeline
// on a WDBC-style CSV and write the classifier artifact plus manifest.

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use oncoscope::classifier::{ClassifierArtifact, TrainingMetrics};
use oncoscope::dataset::{self, Dataset};
use oncoscope::feature_schema::FeatureSchema;
use oncoscope::training::{self, TrainingParams};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Fit the screening classifier", long_about = None)]
struct Args {
    /// Training dataset CSV (feature columns plus diagnosis/target)
    #[clap(short, long)]
    csv: String,

    /// Feature set: core5, full30, or a comma-separated column list
    #[clap(long, default_value = "core5")]
    feature_set: String,

    /// Artifact output path
    #[clap(short, long, default_value = "models/wdbc_logistic.json")]
    output: String,

    /// Held-out fraction for evaluation; 0 trains on everything
    #[clap(long, default_value_t = 0.2)]
    test_split: f64,

    /// Shuffle seed for the reproducible train/test partition
    #[clap(long, default_value_t = 42)]
    seed: u64,

    #[clap(long, default_value_t = 500)]
    epochs: usize,

    #[clap(long, default_value_t = 0.1)]
    lr: f64,

    #[clap(long, default_value_t = 1e-3)]
    l2: f64,

    /// Identifier stored in the artifact; defaults to a timestamped id
    #[clap(long)]
    model_id: Option<String>,
}

// Deployment manifest written next to the artifact.
#[derive(Serialize, Debug)]
struct ModelManifest {
    model_file: String,
    sha256: String,
    version: String,
    feature_set: String,
    input_dim: usize,
    classes: usize,
    timestamp: DateTime<Utc>,
    pipeline: String,
}

fn hash_file(path: &Path) -> anyhow::Result<String> {
    let data = fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(format!("{:x}", hasher.finalize()))
}

fn write_manifest(artifact_path: &Path, args: &Args, input_dim: usize) -> anyhow::Result<()> {
    let manifest = ModelManifest {
        model_file: artifact_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string(),
        sha256: hash_file(artifact_path)?,
        version: "v1".to_string(),
        feature_set: args.feature_set.clone(),
        input_dim,
        classes: 2,
        timestamp: Utc::now(),
        pipeline: "standard_scaler+logistic_regression".to_string(),
    };

    let manifest_path = artifact_path.with_file_name("model_manifest.json");
    let manifest_json = serde_json::to_string_pretty(&manifest)?;
    fs::write(&manifest_path, manifest_json)?;
    println!("✅ Manifest created: {}", manifest_path.display());
    println!("   SHA256: {}", manifest.sha256);

    Ok(())
}

fn print_metrics(metrics: &TrainingMetrics) {
    println!(
        "Accuracy: {:.4} on {} evaluation row(s)",
        metrics.accuracy, metrics.test_rows
    );
    println!("Confusion matrix (rows actual, cols predicted):");
    println!(
        "              malignant  benign\n\
         \x20 malignant  {:>9}  {:>6}\n\
         \x20 benign     {:>9}  {:>6}",
        metrics.confusion[0][0],
        metrics.confusion[0][1],
        metrics.confusion[1][0],
        metrics.confusion[1][1],
    );
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let schema = FeatureSchema::from_config_key(&args.feature_set)?;
    let loaded = dataset::load_csv(Path::new(&args.csv), &schema)
        .with_context(|| format!("loading {}", args.csv))?;
    println!(
        "CSV data loaded: {} rows, {} features.",
        loaded.len(),
        schema.arity()
    );

    let (train, test): (Dataset, Dataset) = loaded.train_test_split(args.test_split, args.seed);

    let params = TrainingParams {
        epochs: args.epochs,
        learning_rate: args.lr,
        l2: args.l2,
    };
    tracing::debug!("fitting on {} rows, holding out {}", train.len(), test.len());
    let pipeline = training::fit(&train, &params)?;
    println!(
        "Training complete: {} epochs, final loss {:.6}.",
        params.epochs, pipeline.final_loss
    );

    // Evaluate on the held-out partition, or on the training partition
    // when no split was requested.
    let metrics = if test.is_empty() {
        training::evaluate(&pipeline, &train, train.len())
    } else {
        training::evaluate(&pipeline, &test, train.len())
    };
    print_metrics(&metrics);

    let model_id = args
        .model_id
        .clone()
        .unwrap_or_else(|| format!("wdbc_logistic_{}", Utc::now().format("%Y%m%d_%H%M%S")));
    let artifact = ClassifierArtifact {
        model_id: model_id.clone(),
        version: "v1".to_string(),
        trained_at: Utc::now(),
        feature_names: schema.names().to_vec(),
        scaler: pipeline.scaler,
        weights: pipeline.weights,
        bias: pipeline.bias,
        metrics: Some(metrics),
    };

    let artifact_path = Path::new(&args.output);
    if let Some(parent) = artifact_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    fs::write(artifact_path, serde_json::to_string_pretty(&artifact)?)
        .with_context(|| format!("writing {}", artifact_path.display()))?;
    println!("✅ Model '{model_id}' exported to: {}", artifact_path.display());

    write_manifest(artifact_path, &args, schema.arity())?;

    Ok(())
}
