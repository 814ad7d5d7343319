//! Prediction endpoint handler

use axum::extract::State;
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::{ApiError, InvocationPayload, Json};
use crate::domain::prediction::PredictionRequest;
use crate::infrastructure::services::PredictionResponse;

/// POST /v1/predictions
pub async fn create_prediction(
    State(state): State<AppState>,
    Json(payload): Json<InvocationPayload>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let request = PredictionRequest::try_from(payload).inspect_err(|e| {
        debug!(error = %e, "Rejected invocation payload");
    })?;

    debug!(
        username = %request.identity().username,
        rows = request.features().len(),
        "Handling prediction request"
    );

    let response = state
        .prediction_service
        .handle(request)
        .await
        .inspect_err(|e| {
            if !e.is_client_error() {
                warn!(error = %e, "Prediction invocation failed");
            }
        })?;

    Ok(Json(response))
}
