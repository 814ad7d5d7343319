//! Dense row-major feature matrix

use crate::domain::DomainError;

/// Row-major matrix of model inputs
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl FeatureMatrix {
    /// Build a matrix from row-major data
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, DomainError> {
        if rows == 0 || cols == 0 {
            return Err(DomainError::shape(format!(
                "Matrix dimensions must be non-zero, got {}x{}",
                rows, cols
            )));
        }

        if rows * cols != data.len() {
            return Err(DomainError::shape(format!(
                "Cannot reshape {} values into {}x{}",
                data.len(),
                rows,
                cols
            )));
        }

        Ok(Self { rows, cols, data })
    }

    /// Reshape a flat sequence into a column: one feature per row
    pub fn column(values: &[f64]) -> Result<Self, DomainError> {
        Self::new(values.len(), 1, values.to_vec())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.cols)
    }
}
