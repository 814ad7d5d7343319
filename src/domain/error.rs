use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Artifact load error: {message}")]
    ArtifactLoad { message: String },

    #[error("Shape error: {message}")]
    Shape { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Prediction error: {message}")]
    Prediction { message: String },

    #[error("Connection error: {message}")]
    Connection { message: String },

    #[error("Store write error: {message}")]
    StoreWrite { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn artifact_load(message: impl Into<String>) -> Self {
        Self::ArtifactLoad {
            message: message.into(),
        }
    }

    pub fn shape(message: impl Into<String>) -> Self {
        Self::Shape {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn prediction(message: impl Into<String>) -> Self {
        Self::Prediction {
            message: message.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn store_write(message: impl Into<String>) -> Self {
        Self::StoreWrite {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// True for errors caused by the caller's payload rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Shape { .. } | Self::Validation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_error() {
        let error = DomainError::shape("features must not be empty");
        assert_eq!(error.to_string(), "Shape error: features must not be empty");
    }

    #[test]
    fn test_store_write_error() {
        let error = DomainError::store_write("ProvisionedThroughputExceededException");
        assert_eq!(
            error.to_string(),
            "Store write error: ProvisionedThroughputExceededException"
        );
    }

    #[test]
    fn test_client_error_classification() {
        assert!(DomainError::shape("").is_client_error());
        assert!(DomainError::validation("").is_client_error());
        assert!(!DomainError::artifact_load("").is_client_error());
        assert!(!DomainError::store_write("").is_client_error());
        assert!(!DomainError::connection("").is_client_error());
    }
}
