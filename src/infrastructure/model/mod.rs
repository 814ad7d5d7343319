//! Model infrastructure - Artifact loading and the linear predictor

mod cached_loader;
mod file_loader;
mod linear;

pub use cached_loader::CachedModelLoader;
pub use file_loader::FileModelLoader;
pub use linear::LinearRegressionModel;

use std::sync::Arc;
use std::time::Duration;

use crate::config::ModelConfig;
use crate::domain::prediction::ModelLoader;

/// Builds the loader described by the configuration
pub fn create_model_loader(config: &ModelConfig) -> Arc<dyn ModelLoader> {
    let loader = FileModelLoader::new(&config.artifact_path);

    match config.cache_ttl_secs {
        Some(ttl) if ttl > 0 => Arc::new(CachedModelLoader::new(loader, Duration::from_secs(ttl))),
        _ => Arc::new(loader),
    }
}
