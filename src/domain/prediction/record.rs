//! Prediction record persisted per user

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
#[cfg(test)]
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::request::UserIdentity;
use crate::domain::DomainError;

/// Number of fractional digits kept for each predicted value
pub const PREDICTION_DECIMALS: u32 = 3;

/// Timestamp layout for `predict_at`: `2024-05-01 13:45:12.123456`
pub const PREDICT_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// One batch of predictions and the moment it was computed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionBatch {
    pub predict_at: String,
    pub values: Vec<Decimal>,
}

impl PredictionBatch {
    /// Round raw model outputs and stamp them with `predict_at`
    pub fn from_raw(predict_at: DateTime<Utc>, raw: &[f64]) -> Result<Self, DomainError> {
        let values = raw
            .iter()
            .map(|value| round_prediction(*value))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            predict_at: format_predict_at(predict_at),
            values,
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

}

#[cfg(test)]
impl PredictionBatch {
    pub fn values_f64(&self) -> Vec<f64> {
        self.values
            .iter()
            .filter_map(|value| value.to_f64())
            .collect()
    }
}

/// The latest predictions stored for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub username: String,
    pub age: i64,
    pub predictions: PredictionBatch,
}

impl PredictionRecord {
    pub fn new(identity: &UserIdentity, predictions: PredictionBatch) -> Self {
        Self {
            username: identity.username.as_str().to_string(),
            age: identity.age,
            predictions,
        }
    }

    pub fn key(&self) -> &str {
        &self.username
    }
}

/// Round a raw prediction to three decimals (ties to even)
///
/// Rounding works on the exact binary value of `value`, so `0.0125` (stored as
/// `0.01250000000000000069...`) rounds up while a true tie like `0.0625` rounds to even.
/// Magnitudes beyond `Decimal::MAX` (about 7.9e28) are rejected.
pub fn round_prediction(value: f64) -> Result<Decimal, DomainError> {
    if !value.is_finite() {
        return Err(DomainError::prediction(format!(
            "Model produced a non-finite value: {}",
            value
        )));
    }

    let decimal = Decimal::from_f64_retain(value).ok_or_else(|| {
        DomainError::prediction(format!(
            "Model produced {:e}, which exceeds the storable decimal range (|value| <= {})",
            value,
            Decimal::MAX
        ))
    })?;

    Ok(decimal
        .round_dp_with_strategy(PREDICTION_DECIMALS, RoundingStrategy::MidpointNearestEven)
        .normalize())
}

pub fn format_predict_at(at: DateTime<Utc>) -> String {
    at.format(PREDICT_AT_FORMAT).to_string()
}
