//! Prediction domain - Requests, model interface and persisted records

mod matrix;
mod predictor;
mod record;
mod request;
mod store;
mod validation;

pub use matrix::FeatureMatrix;
pub use predictor::{ModelLoader, Predictor};
pub use record::{
    format_predict_at, round_prediction, PredictionBatch, PredictionRecord, PREDICTION_DECIMALS,
    PREDICT_AT_FORMAT,
};
pub use request::{PredictionRequest, UserIdentity, Username};
pub use store::{PredictionStore, PARTITION_KEY};
pub use validation::{
    validate_features, validate_username, PredictionValidationError, MAX_USERNAME_LENGTH,
};

#[cfg(test)]
pub use predictor::MockModelLoader;
#[cfg(test)]
pub use store::MockPredictionStore;
