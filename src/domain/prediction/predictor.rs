//! Predictor and model loader traits

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use super::matrix::FeatureMatrix;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// A fitted regression model: one output per input row
pub trait Predictor: Send + Sync + Debug {
    /// Number of features each row must carry
    fn n_features(&self) -> usize;

    /// Predict one value per row of `matrix`
    fn predict(&self, matrix: &FeatureMatrix) -> Result<Vec<f64>, DomainError>;
}

/// Produces a ready-to-use predictor from a model artifact
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ModelLoader: Send + Sync + Debug {
    /// Load (or reuse) the model artifact
    async fn load(&self) -> Result<Arc<dyn Predictor>, DomainError>;

    /// Whether the artifact can currently be loaded
    async fn is_available(&self) -> bool;

    /// Human-readable description of where the artifact comes from
    fn source(&self) -> String;
}
