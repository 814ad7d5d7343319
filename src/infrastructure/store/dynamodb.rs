//! DynamoDB prediction store

use std::collections::HashMap;
use std::fmt::Debug;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_smithy_types::retry::RetryConfig;
use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::domain::prediction::{PredictionRecord, PredictionStore, PARTITION_KEY};
use crate::domain::DomainError;

/// Trait for DynamoDB client operations (for mocking)
#[async_trait]
pub trait DynamoDbClientTrait: Send + Sync + Debug {
    async fn put_item(
        &self,
        table_name: &str,
        item: HashMap<String, AttributeValue>,
    ) -> Result<(), DomainError>;

    async fn describe_table(&self, table_name: &str) -> Result<(), DomainError>;
}

/// Real DynamoDB client wrapper
#[derive(Debug)]
pub struct RealDynamoDbClient {
    client: DynamoDbClient,
}

impl RealDynamoDbClient {
    pub fn new(client: DynamoDbClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DynamoDbClientTrait for RealDynamoDbClient {
    async fn put_item(
        &self,
        table_name: &str,
        item: HashMap<String, AttributeValue>,
    ) -> Result<(), DomainError> {
        self.client
            .put_item()
            .table_name(table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| classify_write_error(table_name, e))?;

        Ok(())
    }

    async fn describe_table(&self, table_name: &str) -> Result<(), DomainError> {
        self.client
            .describe_table()
            .table_name(table_name)
            .send()
            .await
            .map_err(|e| {
                DomainError::connection(format!(
                    "Table '{}' is not reachable: {}",
                    table_name,
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(())
    }
}

/// Transport failures mean the service was never reached; everything else is a rejection
fn classify_write_error<E, R>(table_name: &str, err: SdkError<E, R>) -> DomainError
where
    E: std::error::Error + Send + Sync + 'static,
    R: Debug,
{
    let detail = DisplayErrorContext(&err).to_string();

    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => DomainError::connection(
            format!("DynamoDB unreachable writing to '{}': {}", table_name, detail),
        ),
        _ => DomainError::store_write(format!(
            "DynamoDB rejected write to '{}': {}",
            table_name, detail
        )),
    }
}

/// Prediction store backed by a single DynamoDB table keyed by `username`
#[derive(Debug)]
pub struct DynamoDbPredictionStore<C: DynamoDbClientTrait> {
    client: C,
    table_name: String,
}

impl DynamoDbPredictionStore<RealDynamoDbClient> {
    /// Bind to the configured table, region and endpoint
    ///
    /// Credentials come from the ambient AWS provider chain. SDK retries are
    /// disabled so every upsert is a single attempt.
    pub async fn resolve(config: &StoreConfig) -> Result<Self, DomainError> {
        validate_store_config(config)?;

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()))
            .retry_config(RetryConfig::disabled());

        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint.clone());
        }

        let sdk_config = loader.load().await;
        let client = DynamoDbClient::new(&sdk_config);

        debug!(
            table = %config.table_name,
            region = %config.region,
            endpoint = ?config.endpoint,
            "Resolved DynamoDB prediction table"
        );

        Ok(Self::with_client(
            RealDynamoDbClient::new(client),
            config.table_name.clone(),
        ))
    }
}

impl<C: DynamoDbClientTrait> DynamoDbPredictionStore<C> {
    pub fn with_client(client: C, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl<C: DynamoDbClientTrait> PredictionStore for DynamoDbPredictionStore<C> {
    async fn upsert(&self, record: PredictionRecord) -> Result<(), DomainError> {
        let username = record.username.clone();
        let item = record_to_item(&record);

        self.client
            .put_item(&self.table_name, item)
            .await
            .inspect_err(|e| {
                warn!(table = %self.table_name, username = %username, error = %e, "Upsert failed");
            })?;

        debug!(table = %self.table_name, username = %username, "Prediction record upserted");
        Ok(())
    }

    async fn check_connection(&self) -> Result<(), DomainError> {
        self.client.describe_table(&self.table_name).await
    }

    fn backend_name(&self) -> &'static str {
        "dynamodb"
    }
}

/// Convert a record into a DynamoDB item
///
/// Numbers are sent as decimal strings so no binary float rounding happens on the way.
pub fn record_to_item(record: &PredictionRecord) -> HashMap<String, AttributeValue> {
    let values = record
        .predictions
        .values
        .iter()
        .map(|value| AttributeValue::N(value.to_string()))
        .collect();

    let predictions = HashMap::from([
        (
            "predict_at".to_string(),
            AttributeValue::S(record.predictions.predict_at.clone()),
        ),
        ("values".to_string(), AttributeValue::L(values)),
    ]);

    HashMap::from([
        (
            PARTITION_KEY.to_string(),
            AttributeValue::S(record.username.clone()),
        ),
        ("age".to_string(), AttributeValue::N(record.age.to_string())),
        ("predictions".to_string(), AttributeValue::M(predictions)),
    ])
}

/// Reject configurations that can never reach a table
pub fn validate_store_config(config: &StoreConfig) -> Result<(), DomainError> {
    let name = &config.table_name;

    if name.len() < 3 || name.len() > 255 {
        return Err(DomainError::connection(format!(
            "Invalid table name '{}': must be 3-255 characters",
            name
        )));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err(DomainError::connection(format!(
            "Invalid table name '{}': only letters, digits, '_', '-' and '.' are allowed",
            name
        )));
    }

    if config.region.trim().is_empty() {
        return Err(DomainError::connection("Store region is not configured"));
    }

    if let Some(endpoint) = &config.endpoint {
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(DomainError::connection(format!(
                "Invalid store endpoint '{}': expected an http(s) URL",
                endpoint
            )));
        }
    }

    Ok(())
}
