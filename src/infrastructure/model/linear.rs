//! Linear regression model

use serde::{Deserialize, Serialize};

use crate::domain::prediction::{FeatureMatrix, Predictor};
use crate::domain::DomainError;

/// Fitted ordinary least squares model: `y = intercept + coefficients . x`
///
/// The artifact is stored as JSON. Field names exported by scikit-learn
/// (`coef_`, `intercept_`) are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressionModel {
    #[serde(alias = "coef_")]
    coefficients: Vec<f64>,
    #[serde(alias = "intercept_", default)]
    intercept: f64,
}

impl LinearRegressionModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, DomainError> {
        let model = Self {
            coefficients,
            intercept,
        };
        model.validate()?;
        Ok(model)
    }

    /// Parse and validate a serialized artifact
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DomainError> {
        let model: Self = serde_json::from_slice(bytes)
            .map_err(|e| DomainError::artifact_load(format!("Corrupt model artifact: {}", e)))?;
        model.validate()?;
        Ok(model)
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.coefficients.is_empty() {
            return Err(DomainError::artifact_load(
                "Model artifact has no coefficients",
            ));
        }

        let all_finite =
            self.coefficients.iter().all(|c| c.is_finite()) && self.intercept.is_finite();

        if !all_finite {
            return Err(DomainError::artifact_load(
                "Model artifact contains non-finite parameters",
            ));
        }

        Ok(())
    }
}

impl Predictor for LinearRegressionModel {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, matrix: &FeatureMatrix) -> Result<Vec<f64>, DomainError> {
        if matrix.cols() != self.n_features() {
            return Err(DomainError::shape(format!(
                "Model expects {} feature(s) per row, got {}",
                self.n_features(),
                matrix.cols()
            )));
        }

        Ok(matrix
            .iter_rows()
            .map(|row| {
                row.iter()
                    .zip(&self.coefficients)
                    .fold(self.intercept, |acc, (x, c)| acc + x * c)
            })
            .collect())
    }
}
