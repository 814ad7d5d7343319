//! JSON extractor that reports rejections in the API error format

use axum::{
    extract::{rejection::JsonRejection as AxumJsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::de::DeserializeOwned;

use super::error::{ApiError, ApiErrorType};

/// Wrapper around `axum::Json` whose rejections are `ApiError` bodies
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T> std::ops::Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumJson::<T>::from_request(req, state).await {
            Ok(AxumJson(value)) => Ok(Json(value)),
            Err(rejection) => Err(rejection_to_error(&rejection)),
        }
    }
}

fn rejection_to_error(rejection: &AxumJsonRejection) -> ApiError {
    use axum::extract::rejection::JsonRejection::*;

    let message = match rejection {
        JsonDataError(err) => format!("Invalid payload: {}", err.body_text()),
        JsonSyntaxError(err) => format!("Invalid JSON syntax: {}", err.body_text()),
        MissingJsonContentType(_) => {
            "Missing Content-Type header. Expected 'application/json'.".to_string()
        }
        BytesRejection(err) => format!("Failed to read request body: {}", err.body_text()),
        _ => "Invalid JSON request".to_string(),
    };

    let status = match rejection.status() {
        StatusCode::UNSUPPORTED_MEDIA_TYPE => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        _ => StatusCode::BAD_REQUEST,
    };

    ApiError::new(status, ApiErrorType::InvalidRequestError, message).with_code("invalid_payload")
}

impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        value: i64,
    }

    fn json_request(body: &str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_extracts_valid_json() {
        let Json(payload) =
            <Json<Payload> as FromRequest<()>>::from_request(json_request(r#"{"value": 3}"#), &())
                .await
                .unwrap();

        assert_eq!(payload.value, 3);
    }

    #[tokio::test]
    async fn test_syntax_error_is_bad_request() {
        let err = <Json<Payload> as FromRequest<()>>::from_request(json_request("{"), &())
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), Some("invalid_payload"));
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let request = axum::http::Request::builder()
            .method("POST")
            .body(Body::from(r#"{"value": 3}"#))
            .unwrap();

        let err = <Json<Payload> as FromRequest<()>>::from_request(request, &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[test]
    fn test_json_deref() {
        assert_eq!(*Json(42), 42);
        assert_eq!(*Json("x"), "x");
    }
}
