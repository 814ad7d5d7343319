//! Prediction store trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::record::PredictionRecord;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Partition key attribute of the prediction table
pub const PARTITION_KEY: &str = "username";

/// Keyed store holding the latest prediction batch per user
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PredictionStore: Send + Sync + Debug {
    /// Inserts the record or overwrites the one with the same username (last writer wins)
    async fn upsert(&self, record: PredictionRecord) -> Result<(), DomainError>;

    /// Verifies the backing table is reachable
    async fn check_connection(&self) -> Result<(), DomainError>;

    /// Backend name used in logs and health checks
    fn backend_name(&self) -> &'static str;
}
