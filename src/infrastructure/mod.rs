//! Infrastructure layer - Model loading, store backends, logging and services

pub mod logging;
pub mod model;
pub mod services;
pub mod store;
