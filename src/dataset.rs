//! Tabular dataset loading for the offline trainer.

use crate::errors::{ScreenError, ScreenResult};
use crate::feature_schema::FeatureSchema;
use crate::verdict::{CLASS_BENIGN, CLASS_MALIGNANT};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::path::Path;

/// Rows selected for the configured feature subset, with class labels
/// under the malignant=0, benign=1 convention.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub feature_names: Vec<String>,
    pub rows: Vec<Vec<f64>>,
    pub labels: Vec<usize>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Seeded shuffle-and-split for reproducible train/test partitions.
    /// `test_fraction` of 0.0 keeps everything in the training set.
    pub fn train_test_split(self, test_fraction: f64, seed: u64) -> (Dataset, Dataset) {
        let mut indices: Vec<usize> = (0..self.rows.len()).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let test_len = ((self.rows.len() as f64) * test_fraction.clamp(0.0, 0.9)) as usize;
        let (test_idx, train_idx) = indices.split_at(test_len);

        let pick = |idx: &[usize]| Dataset {
            feature_names: self.feature_names.clone(),
            rows: idx.iter().map(|&i| self.rows[i].clone()).collect(),
            labels: idx.iter().map(|&i| self.labels[i]).collect(),
        };

        (pick(train_idx), pick(test_idx))
    }
}

/// Load a WDBC-style CSV: one column per feature name in `schema`, plus
/// either a `diagnosis` column (`M`/`B`) or a numeric `target` column
/// (0 = malignant, 1 = benign).
pub fn load_csv(path: &Path, schema: &FeatureSchema) -> ScreenResult<Dataset> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| ScreenError::dataset(format!("open {}: {e}", path.display())))?;

    let headers = reader
        .headers()
        .map_err(|e| ScreenError::dataset(format!("read headers: {e}")))?
        .clone();
    let column_of = |name: &str| headers.iter().position(|h| h.trim() == name);

    let mut feature_cols = Vec::with_capacity(schema.arity());
    for name in schema.names() {
        let col = column_of(name).ok_or_else(|| {
            ScreenError::dataset(format!("feature column '{name}' not found in CSV"))
        })?;
        feature_cols.push(col);
    }

    let label_source = match (column_of("diagnosis"), column_of("target")) {
        (Some(col), _) => LabelSource::Diagnosis(col),
        (None, Some(col)) => LabelSource::Target(col),
        (None, None) => {
            return Err(ScreenError::dataset(
                "no label column: expected 'diagnosis' (M/B) or 'target' (0/1)",
            ))
        }
    };

    let mut rows = Vec::new();
    let mut labels = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record =
            record.map_err(|e| ScreenError::dataset(format!("row {}: {e}", line + 1)))?;

        let mut row = Vec::with_capacity(feature_cols.len());
        for (&col, name) in feature_cols.iter().zip(schema.names()) {
            let cell = record.get(col).unwrap_or("");
            let value: f64 = cell.trim().parse().map_err(|_| {
                ScreenError::dataset(format!(
                    "row {}: column '{name}' has non-numeric value '{cell}'",
                    line + 1
                ))
            })?;
            row.push(value);
        }

        let label = parse_label(&record, label_source, line + 1)?;
        rows.push(row);
        labels.push(label);
    }

    if rows.is_empty() {
        return Err(ScreenError::dataset(format!(
            "{} contains no data rows",
            path.display()
        )));
    }

    Ok(Dataset {
        feature_names: schema.names().to_vec(),
        rows,
        labels,
    })
}

#[derive(Debug, Clone, Copy)]
enum LabelSource {
    Diagnosis(usize),
    Target(usize),
}

fn parse_label(
    record: &csv::StringRecord,
    source: LabelSource,
    line: usize,
) -> ScreenResult<usize> {
    match source {
        LabelSource::Diagnosis(col) => {
            let cell = record.get(col).unwrap_or("").trim();
            match cell {
                "M" | "m" => Ok(CLASS_MALIGNANT),
                "B" | "b" => Ok(CLASS_BENIGN),
                other => Err(ScreenError::dataset(format!(
                    "row {line}: diagnosis must be M or B, got '{other}'"
                ))),
            }
        }
        LabelSource::Target(col) => {
            let cell = record.get(col).unwrap_or("").trim();
            match cell {
                "0" => Ok(CLASS_MALIGNANT),
                "1" => Ok(CLASS_BENIGN),
                other => Err(ScreenError::dataset(format!(
                    "row {line}: target must be 0 or 1, got '{other}'"
                ))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn two_feature_schema() -> FeatureSchema {
        FeatureSchema::from_names(vec!["mean_radius".into(), "mean_area".into()]).unwrap()
    }

    #[test]
    fn loads_diagnosis_labels() {
        let file = write_csv(
            "mean_radius,mean_area,diagnosis\n\
             20.5,1500.0,M\n\
             9.1,240.0,B\n",
        );
        let ds = load_csv(file.path(), &two_feature_schema()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.labels, vec![CLASS_MALIGNANT, CLASS_BENIGN]);
        assert_eq!(ds.rows[0], vec![20.5, 1500.0]);
    }

    #[test]
    fn loads_numeric_target_labels() {
        let file = write_csv(
            "mean_radius,mean_area,target\n\
             20.5,1500.0,0\n\
             9.1,240.0,1\n",
        );
        let ds = load_csv(file.path(), &two_feature_schema()).unwrap();
        assert_eq!(ds.labels, vec![CLASS_MALIGNANT, CLASS_BENIGN]);
    }

    #[test]
    fn missing_feature_column_is_reported_by_name() {
        let file = write_csv("mean_radius,diagnosis\n20.5,M\n");
        let err = load_csv(file.path(), &two_feature_schema()).unwrap_err();
        assert!(err.to_string().contains("mean_area"));
    }

    #[test]
    fn non_numeric_cell_is_reported_with_row() {
        let file = write_csv(
            "mean_radius,mean_area,diagnosis\n\
             20.5,oops,M\n",
        );
        let err = load_csv(file.path(), &two_feature_schema()).unwrap_err();
        assert!(err.to_string().contains("row 1"));
        assert!(err.to_string().contains("mean_area"));
    }

    #[test]
    fn split_is_reproducible_for_a_seed() {
        let rows: Vec<Vec<f64>> = (0..20).map(|i| vec![i as f64, i as f64]).collect();
        let labels = vec![CLASS_BENIGN; 20];
        let ds = Dataset {
            feature_names: vec!["a".into(), "b".into()],
            rows: rows.clone(),
            labels: labels.clone(),
        };
        let ds2 = Dataset {
            feature_names: vec!["a".into(), "b".into()],
            rows,
            labels,
        };

        let (train_a, test_a) = ds.train_test_split(0.25, 42);
        let (train_b, test_b) = ds2.train_test_split(0.25, 42);

        assert_eq!(test_a.len(), 5);
        assert_eq!(train_a.len(), 15);
        assert_eq!(train_a.rows, train_b.rows);
        assert_eq!(test_a.rows, test_b.rows);
    }

    #[test]
    fn zero_fraction_keeps_all_rows_for_training() {
        let ds = Dataset {
            feature_names: vec!["a".into()],
            rows: vec![vec![1.0], vec![2.0]],
            labels: vec![0, 1],
        };
        let (train, test) = ds.train_test_split(0.0, 7);
        assert_eq!(train.len(), 2);
        assert!(test.is_empty());
    }
}
