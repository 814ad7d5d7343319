//! In-memory prediction store

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::prediction::{PredictionRecord, PredictionStore};
use crate::domain::DomainError;

/// Thread-safe in-memory prediction store
///
/// Useful for testing and development. Data is lost when the process terminates.
#[derive(Debug, Default)]
pub struct InMemoryPredictionStore {
    records: RwLock<HashMap<String, PredictionRecord>>,
}

impl InMemoryPredictionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored record for a username
    pub fn get(&self, username: &str) -> Result<Option<PredictionRecord>, DomainError> {
        let records = self.records.read().map_err(|e| {
            DomainError::internal(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(records.get(username).cloned())
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PredictionStore for InMemoryPredictionStore {
    async fn upsert(&self, record: PredictionRecord) -> Result<(), DomainError> {
        let mut records = self.records.write().map_err(|e| {
            DomainError::store_write(format!("Failed to acquire write lock: {}", e))
        })?;

        records.insert(record.key().to_string(), record);
        Ok(())
    }

    async fn check_connection(&self) -> Result<(), DomainError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prediction::PredictionBatch;
    use rust_decimal::Decimal;

    fn record(username: &str, predict_at: &str, values: &[i64]) -> PredictionRecord {
        PredictionRecord {
            username: username.to_string(),
            age: 30,
            predictions: PredictionBatch {
                predict_at: predict_at.to_string(),
                values: values.iter().map(|v| Decimal::from(*v)).collect(),
            },
        }
    }

    #[tokio::test]
    async fn test_upsert_inserts() {
        let store = InMemoryPredictionStore::new();
        assert!(store.is_empty());

        store.upsert(record("alice", "t1", &[1, 2])).await.unwrap();

        let stored = store.get("alice").unwrap().unwrap();
        assert_eq!(stored.predictions.values.len(), 2);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_last_writer_wins() {
        let store = InMemoryPredictionStore::new();

        store.upsert(record("alice", "t1", &[1])).await.unwrap();
        store.upsert(record("alice", "t2", &[7])).await.unwrap();

        let stored = store.get("alice").unwrap().unwrap();
        assert_eq!(stored.predictions.predict_at, "t2");
        assert_eq!(stored.predictions.values, vec![Decimal::from(7)]);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_distinct_users_are_kept_apart() {
        let store = InMemoryPredictionStore::new();

        store.upsert(record("alice", "t1", &[1])).await.unwrap();
        store.upsert(record("bob", "t1", &[2])).await.unwrap();

        assert_eq!(store.len(), 2);
        assert!(store.get("carol").unwrap().is_none());
    }
}
