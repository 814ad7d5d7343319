//! API error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::prediction::PredictionValidationError;
use crate::domain::DomainError;

/// Error categories exposed to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    ServerError,
    UpstreamError,
    ServiceUnavailableError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestError => write!(f, "invalid_request_error"),
            Self::ServerError => write!(f, "server_error"),
            Self::UpstreamError => write!(f, "upstream_error"),
            Self::ServiceUnavailableError => write!(f, "service_unavailable_error"),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Error detail structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                    param: None,
                    code: None,
                },
            },
        }
    }

    /// Add parameter info
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.response.error.param = Some(param.into());
        self
    }

    /// Add error code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.response.error.code = Some(code.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiErrorType::InvalidRequestError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ApiErrorType::ServerError, message)
    }

    /// The backing store rejected the request
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, ApiErrorType::UpstreamError, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            ApiErrorType::ServiceUnavailableError,
            message,
        )
    }

    pub fn code(&self) -> Option<&str> {
        self.response.error.code.as_deref()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Shape { message } => Self::bad_request(message)
                .with_param("X")
                .with_code("shape_error"),
            DomainError::Validation { message } => {
                Self::bad_request(message).with_code("validation_error")
            }
            DomainError::ArtifactLoad { message } => {
                Self::internal(message).with_code("artifact_load_error")
            }
            DomainError::Prediction { message } => {
                Self::internal(message).with_code("prediction_error")
            }
            DomainError::Connection { message } => {
                Self::unavailable(message).with_code("connection_error")
            }
            DomainError::StoreWrite { message } => {
                Self::bad_gateway(message).with_code("store_write_error")
            }
            DomainError::Internal { message } => Self::internal(message),
        }
    }
}

impl From<PredictionValidationError> for ApiError {
    fn from(err: PredictionValidationError) -> Self {
        DomainError::from(err).into()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.response.error.error_type, self.response.error.message
        )
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_creation() {
        let err = ApiError::bad_request("Invalid payload");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error.error_type, ApiErrorType::InvalidRequestError);
        assert_eq!(err.response.error.message, "Invalid payload");
    }

    #[test]
    fn test_shape_error_conversion() {
        let api_err: ApiError = DomainError::shape("empty").into();

        assert_eq!(api_err.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_err.code(), Some("shape_error"));
        assert_eq!(api_err.response.error.param.as_deref(), Some("X"));
    }

    #[test]
    fn test_backend_error_statuses() {
        let cases = [
            (DomainError::artifact_load(""), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::prediction(""), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::connection(""), StatusCode::SERVICE_UNAVAILABLE),
            (DomainError::store_write(""), StatusCode::BAD_GATEWAY),
            (DomainError::validation(""), StatusCode::BAD_REQUEST),
            (DomainError::internal(""), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (domain_err, status) in cases {
            let api_err: ApiError = domain_err.into();
            assert_eq!(api_err.status, status);
        }
    }

    #[test]
    fn test_internal_error_conversion() {
        let api_err: ApiError = DomainError::internal("lock poisoned").into();

        assert_eq!(api_err.response.error.error_type, ApiErrorType::ServerError);
        assert_eq!(api_err.code(), None);
        assert_eq!(api_err.to_string(), "server_error: lock poisoned");
    }

    #[test]
    fn test_validation_error_conversion() {
        let api_err: ApiError = PredictionValidationError::MissingUsername.into();

        assert_eq!(api_err.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_err.code(), Some("validation_error"));
    }

    #[test]
    fn test_error_serialization() {
        let err: ApiError = DomainError::store_write("AccessDeniedException").into();
        let json = serde_json::to_string(&err.response).unwrap();

        assert!(json.contains("\"type\":\"upstream_error\""));
        assert!(json.contains("store_write_error"));
        assert!(json.contains("AccessDeniedException"));
    }
}
