//! Domain layer - Core types, traits and errors

pub mod error;
pub mod prediction;

pub use error::DomainError;
pub use prediction::{
    FeatureMatrix, ModelLoader, PredictionBatch, PredictionRecord, PredictionRequest,
    PredictionStore, Predictor, UserIdentity, Username,
};
