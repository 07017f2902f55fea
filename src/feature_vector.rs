//! Fixed-arity numeric input assembled from user-entered measurements.

use crate::errors::InvalidInputError;
use crate::feature_schema::FeatureSchema;

/// One row of tumor measurements, validated against a [`FeatureSchema`]
/// before construction. Immutable; consumed by a single prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    /// Parse a comma-separated line of numeric tokens.
    ///
    /// Token count must match the schema arity and every token must be
    /// a finite number; nothing is constructed otherwise.
    pub fn parse(raw: &str, schema: &FeatureSchema) -> Result<Self, InvalidInputError> {
        let tokens: Vec<&str> = raw.split(',').map(str::trim).collect();
        if tokens.len() != schema.arity() {
            return Err(InvalidInputError::WrongArity {
                expected: schema.arity(),
                actual: tokens.len(),
            });
        }

        let mut values = Vec::with_capacity(tokens.len());
        for (index, token) in tokens.iter().enumerate() {
            let value: f64 = token.parse().map_err(|_| InvalidInputError::NonNumeric {
                index,
                token: token.to_string(),
            })?;
            if !value.is_finite() {
                return Err(InvalidInputError::NonFinite { index });
            }
            values.push(value);
        }

        Ok(FeatureVector { values })
    }

    /// Build from already-parsed values, e.g. discrete numeric fields.
    pub fn from_values(
        values: Vec<f64>,
        schema: &FeatureSchema,
    ) -> Result<Self, InvalidInputError> {
        if values.len() != schema.arity() {
            return Err(InvalidInputError::WrongArity {
                expected: schema.arity(),
                actual: values.len(),
            });
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(InvalidInputError::NonFinite { index });
        }
        Ok(FeatureVector { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
