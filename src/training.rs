//! Offline fitting of the two-stage pipeline: standardization followed
//! by binary logistic regression, trained by full-batch gradient
//! descent.

use crate::classifier::{sigmoid, StandardScaler, TrainingMetrics};
use crate::dataset::Dataset;
use crate::errors::{ScreenError, ScreenResult};
use crate::verdict::{CLASS_BENIGN, CLASS_MALIGNANT};
use log::debug;

#[derive(Debug, Clone)]
pub struct TrainingParams {
    pub epochs: usize,
    pub learning_rate: f64,
    pub l2: f64,
}

impl Default for TrainingParams {
    fn default() -> Self {
        TrainingParams {
            epochs: 500,
            learning_rate: 0.1,
            l2: 1e-3,
        }
    }
}

/// A fitted pipeline, ready to be wrapped into an artifact.
#[derive(Debug, Clone)]
pub struct FittedPipeline {
    pub scaler: StandardScaler,
    pub weights: Vec<f64>,
    pub bias: f64,
    pub final_loss: f64,
}

impl FittedPipeline {
    /// Probability of the benign class for one raw row.
    pub fn benign_probability(&self, row: &[f64]) -> f64 {
        let standardized = self.scaler.transform(row);
        let z = self.bias
            + standardized
                .iter()
                .zip(self.weights.iter())
                .map(|(x, w)| x * w)
                .sum::<f64>();
        sigmoid(z)
    }

    pub fn predict_class(&self, row: &[f64]) -> usize {
        if self.benign_probability(row) >= 0.5 {
            CLASS_BENIGN
        } else {
            CLASS_MALIGNANT
        }
    }
}

/// Fit column means and standard deviations on the training partition.
pub fn fit_scaler(rows: &[Vec<f64>]) -> ScreenResult<StandardScaler> {
    let n = rows.len();
    if n == 0 {
        return Err(ScreenError::dataset("cannot fit scaler on empty data"));
    }
    let arity = rows[0].len();

    let mut means = vec![0.0; arity];
    for row in rows {
        for (m, x) in means.iter_mut().zip(row) {
            *m += x;
        }
    }
    for m in &mut means {
        *m /= n as f64;
    }

    let mut stds = vec![0.0; arity];
    for row in rows {
        for ((s, m), x) in stds.iter_mut().zip(&means).zip(row) {
            *s += (x - m) * (x - m);
        }
    }
    for s in &mut stds {
        *s = (*s / n as f64).sqrt();
    }

    Ok(StandardScaler { means, stds })
}

/// Fit the full pipeline on a training partition.
pub fn fit(train: &Dataset, params: &TrainingParams) -> ScreenResult<FittedPipeline> {
    if train.is_empty() {
        return Err(ScreenError::dataset("training partition is empty"));
    }

    let scaler = fit_scaler(&train.rows)?;
    let standardized: Vec<Vec<f64>> = train.rows.iter().map(|r| scaler.transform(r)).collect();
    // Logistic target: 1.0 for benign, 0.0 for malignant.
    let targets: Vec<f64> = train
        .labels
        .iter()
        .map(|&label| if label == CLASS_BENIGN { 1.0 } else { 0.0 })
        .collect();

    let n = standardized.len() as f64;
    let arity = standardized[0].len();
    let mut weights = vec![0.0; arity];
    let mut bias = 0.0;
    let mut final_loss = f64::INFINITY;

    for epoch in 1..=params.epochs {
        let mut grad_w = vec![0.0; arity];
        let mut grad_b = 0.0;
        let mut loss = 0.0;

        for (row, &y) in standardized.iter().zip(&targets) {
            let z = bias + row.iter().zip(&weights).map(|(x, w)| x * w).sum::<f64>();
            let p = sigmoid(z);
            let residual = p - y;

            for (g, x) in grad_w.iter_mut().zip(row) {
                *g += residual * x;
            }
            grad_b += residual;
            // Clamped cross-entropy keeps the loss finite for saturated
            // predictions.
            let p_clamped = p.clamp(1e-12, 1.0 - 1e-12);
            loss -= y * p_clamped.ln() + (1.0 - y) * (1.0 - p_clamped).ln();
        }

        for (w, g) in weights.iter_mut().zip(&grad_w) {
            *w -= params.learning_rate * (g / n + params.l2 * *w);
        }
        bias -= params.learning_rate * grad_b / n;

        final_loss = loss / n;
        if epoch % 50 == 0 || epoch == params.epochs {
            debug!("epoch {epoch}/{}, loss {final_loss:.6}", params.epochs);
        }
    }

    Ok(FittedPipeline {
        scaler,
        weights,
        bias,
        final_loss,
    })
}

/// Accuracy and confusion matrix of a fitted pipeline on a partition.
/// Confusion rows are actual class, columns predicted class.
pub fn evaluate(
    pipeline: &FittedPipeline,
    partition: &Dataset,
    train_rows: usize,
) -> TrainingMetrics {
    let mut confusion = [[0usize; 2]; 2];
    for (row, &actual) in partition.rows.iter().zip(&partition.labels) {
        let predicted = pipeline.predict_class(row);
        confusion[actual][predicted] += 1;
    }
    let correct = confusion[0][0] + confusion[1][1];
    let total = partition.len();
    TrainingMetrics {
        accuracy: if total == 0 {
            0.0
        } else {
            correct as f64 / total as f64
        },
        confusion,
        train_rows,
        test_rows: total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Separable toy set: small measurements benign, large malignant.
    fn toy_dataset() -> Dataset {
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for i in 0..20 {
            let offset = i as f64 * 0.05;
            rows.push(vec![8.0 + offset, 200.0 + 10.0 * offset]);
            labels.push(CLASS_BENIGN);
            rows.push(vec![22.0 + offset, 1600.0 + 10.0 * offset]);
            labels.push(CLASS_MALIGNANT);
        }
        Dataset {
            feature_names: vec!["mean_radius".into(), "mean_area".into()],
            rows,
            labels,
        }
    }

    #[test]
    fn scaler_matches_hand_computation() {
        let scaler = fit_scaler(&[vec![1.0, 10.0], vec![3.0, 30.0]]).unwrap();
        assert_eq!(scaler.means, vec![2.0, 20.0]);
        assert_eq!(scaler.stds, vec![1.0, 10.0]);
    }

    #[test]
    fn separable_data_fits_cleanly() {
        let dataset = toy_dataset();
        let pipeline = fit(&dataset, &TrainingParams::default()).unwrap();
        let metrics = evaluate(&pipeline, &dataset, dataset.len());

        assert!(metrics.accuracy > 0.95, "accuracy {}", metrics.accuracy);
        // Benign class gets larger probability on small measurements.
        assert!(pipeline.benign_probability(&[8.5, 210.0]) > 0.5);
        assert!(pipeline.benign_probability(&[23.0, 1700.0]) < 0.5);
    }

    #[test]
    fn fitting_is_deterministic() {
        let dataset = toy_dataset();
        let a = fit(&dataset, &TrainingParams::default()).unwrap();
        let b = fit(&dataset, &TrainingParams::default()).unwrap();
        assert_eq!(a.weights, b.weights);
        assert_eq!(a.bias.to_bits(), b.bias.to_bits());
    }

    #[test]
    fn empty_training_partition_rejected() {
        let empty = Dataset {
            feature_names: vec!["a".into()],
            rows: vec![],
            labels: vec![],
        };
        assert!(fit(&empty, &TrainingParams::default()).is_err());
    }

    #[test]
    fn confusion_matrix_counts_actual_by_predicted() {
        let dataset = toy_dataset();
        let pipeline = fit(&dataset, &TrainingParams::default()).unwrap();
        let metrics = evaluate(&pipeline, &dataset, dataset.len());

        let total: usize = metrics.confusion.iter().flatten().sum();
        assert_eq!(total, dataset.len());
        // Diagonal dominates on separable data.
        assert!(metrics.confusion[0][0] + metrics.confusion[1][1] >= 38);
    }
}
