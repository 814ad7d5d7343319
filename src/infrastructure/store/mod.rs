//! Store infrastructure - Prediction store backends

mod dynamodb;
mod in_memory;

pub use dynamodb::{
    record_to_item, validate_store_config, DynamoDbClientTrait, DynamoDbPredictionStore,
    RealDynamoDbClient,
};
pub use in_memory::InMemoryPredictionStore;

use std::sync::Arc;

use tracing::info;

use crate::config::{StoreBackend, StoreConfig};
use crate::domain::prediction::PredictionStore;
use crate::domain::DomainError;

/// Resolves a handle to the configured prediction table
pub async fn resolve_store(config: &StoreConfig) -> Result<Arc<dyn PredictionStore>, DomainError> {
    let store: Arc<dyn PredictionStore> = match config.backend {
        StoreBackend::DynamoDb => Arc::new(DynamoDbPredictionStore::resolve(config).await?),
        StoreBackend::Memory => Arc::new(InMemoryPredictionStore::new()),
    };

    info!(
        backend = store.backend_name(),
        table = %config.table_name,
        "Prediction store resolved"
    );

    Ok(store)
}
