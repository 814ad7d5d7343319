//! User Prediction API
//!
//! Single-request inference service:
//! - Loads a fitted linear regression artifact
//! - Predicts one value per input feature and rounds to three decimals
//! - Upserts the latest predictions per user into DynamoDB (or memory)

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod server;

pub use config::AppConfig;

use tracing::info;

use api::state::AppState;
use infrastructure::model::create_model_loader;
use infrastructure::services::PredictionService;
use infrastructure::store::resolve_store;

/// Build the application state from configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let loader = create_model_loader(&config.model);
    info!(
        artifact = %loader.source(),
        cache_ttl_secs = ?config.model.cache_ttl_secs,
        "Model loader configured"
    );

    if !loader.is_available().await {
        tracing::warn!(artifact = %loader.source(), "Model artifact not found at startup");
    }

    let store = resolve_store(&config.store).await?;

    Ok(AppState::new(PredictionService::new(loader, store)))
}
