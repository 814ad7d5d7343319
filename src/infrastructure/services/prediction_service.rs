//! Prediction service - load the model, predict, persist, respond

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::prediction::{
    FeatureMatrix, ModelLoader, PredictionBatch, PredictionRecord, PredictionRequest,
    PredictionStore,
};
use crate::domain::DomainError;

/// Source of the `predict_at` timestamp
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Result of one invocation, identical to what was persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predictions: PredictionBatch,
}

/// Handles one prediction request end to end
///
/// Each call loads the model through the loader, writes exactly one record
/// to the store and only then returns. Errors abort the call; nothing is retried.
#[derive(Clone)]
pub struct PredictionService {
    loader: Arc<dyn ModelLoader>,
    store: Arc<dyn PredictionStore>,
    clock: Clock,
}

impl fmt::Debug for PredictionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredictionService")
            .field("loader", &self.loader)
            .field("store", &self.store)
            .finish()
    }
}

impl PredictionService {
    pub fn new(loader: Arc<dyn ModelLoader>, store: Arc<dyn PredictionStore>) -> Self {
        Self {
            loader,
            store,
            clock: Arc::new(Utc::now),
        }
    }

    /// Replace the wall clock, mainly for tests
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn loader(&self) -> &Arc<dyn ModelLoader> {
        &self.loader
    }

    pub fn store(&self) -> &Arc<dyn PredictionStore> {
        &self.store
    }

    pub async fn handle(
        &self,
        request: PredictionRequest,
    ) -> Result<PredictionResponse, DomainError> {
        let identity = request.identity();

        let model = self.loader.load().await?;
        let matrix = FeatureMatrix::column(request.features())?;

        let predict_at = (self.clock)();
        let raw = model.predict(&matrix)?;

        if raw.len() != matrix.rows() {
            return Err(DomainError::prediction(format!(
                "Model returned {} value(s) for {} row(s)",
                raw.len(),
                matrix.rows()
            )));
        }

        let batch = PredictionBatch::from_raw(predict_at, &raw)?;

        debug!(
            username = %identity.username,
            rows = matrix.rows(),
            "Predictions computed"
        );

        let record = PredictionRecord::new(identity, batch.clone());
        self.store.upsert(record).await?;

        info!(
            username = %identity.username,
            rows = batch.len(),
            store = self.store.backend_name(),
            "Prediction stored"
        );

        Ok(PredictionResponse { predictions: batch })
    }
}
