//! Loads the model artifact from a local file on every call

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::linear::LinearRegressionModel;
use crate::domain::prediction::{ModelLoader, Predictor};
use crate::domain::DomainError;

/// Reads and deserializes the artifact at a fixed, trusted path
#[derive(Debug, Clone)]
pub struct FileModelLoader {
    path: PathBuf,
}

impl FileModelLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ModelLoader for FileModelLoader {
    async fn load(&self) -> Result<Arc<dyn Predictor>, DomainError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            DomainError::artifact_load(format!(
                "Failed to read model artifact '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        let model = LinearRegressionModel::from_slice(&bytes)?;

        debug!(
            path = %self.path.display(),
            n_features = model.n_features(),
            "Model artifact loaded"
        );

        Ok(Arc::new(model))
    }

    async fn is_available(&self) -> bool {
        tokio::fs::metadata(&self.path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    fn source(&self) -> String {
        self.path.display().to_string()
    }
}
