//! Request validation utilities

use std::fmt;

use crate::domain::DomainError;

/// Maximum length for usernames (DynamoDB partition keys are capped at 2048 bytes)
pub const MAX_USERNAME_LENGTH: usize = 2048;

/// Prediction request validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionValidationError {
    /// The `user` object is absent
    MissingUser,
    /// The `username` field is absent
    MissingUsername,
    /// The `username` field is present but empty
    EmptyUsername,
    /// Username exceeds maximum length
    UsernameTooLong { length: usize, max: usize },
    /// The `age` field is absent
    MissingAge,
    /// The `X` field is absent
    MissingFeatures,
    /// `X` is not a sequence
    NotASequence,
    /// The feature sequence has no elements
    EmptyFeatures,
    /// `X` is neither a sequence of numbers nor a sequence of numeric rows
    NonNumericFeature { index: usize },
    /// Rows of a nested feature sequence differ in length
    RaggedFeatures {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// NaN or infinite feature value
    NonFiniteFeature { index: usize },
}

impl PredictionValidationError {
    /// Whether the error concerns the shape of the feature input
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Self::MissingFeatures
                | Self::NotASequence
                | Self::EmptyFeatures
                | Self::NonNumericFeature { .. }
                | Self::RaggedFeatures { .. }
                | Self::NonFiniteFeature { .. }
        )
    }
}

impl fmt::Display for PredictionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingUser => write!(f, "Missing required field 'user'"),
            Self::MissingUsername => write!(f, "Missing required field 'user.username'"),
            Self::EmptyUsername => write!(f, "Username cannot be empty"),
            Self::UsernameTooLong { length, max } => {
                write!(f, "Username too long: {} bytes (max {})", length, max)
            }
            Self::MissingAge => write!(f, "Missing required field 'user.age'"),
            Self::MissingFeatures => write!(f, "Missing required field 'X'"),
            Self::NotASequence => write!(f, "Field 'X' must be a sequence of numbers"),
            Self::EmptyFeatures => write!(f, "Feature sequence 'X' cannot be empty"),
            Self::NonNumericFeature { index } => {
                write!(f, "Feature at index {} is not numeric", index)
            }
            Self::RaggedFeatures {
                row,
                expected,
                found,
            } => write!(
                f,
                "Feature row {} has {} values, expected {}",
                row, found, expected
            ),
            Self::NonFiniteFeature { index } => {
                write!(f, "Feature at index {} is not a finite number", index)
            }
        }
    }
}

impl std::error::Error for PredictionValidationError {}

impl From<PredictionValidationError> for DomainError {
    fn from(err: PredictionValidationError) -> Self {
        if err.is_shape_error() {
            DomainError::shape(err.to_string())
        } else {
            DomainError::validation(err.to_string())
        }
    }
}

/// Validate a username
pub fn validate_username(username: &str) -> Result<(), PredictionValidationError> {
    if username.trim().is_empty() {
        return Err(PredictionValidationError::EmptyUsername);
    }

    if username.len() > MAX_USERNAME_LENGTH {
        return Err(PredictionValidationError::UsernameTooLong {
            length: username.len(),
            max: MAX_USERNAME_LENGTH,
        });
    }

    Ok(())
}

/// Validate a flattened feature sequence
pub fn validate_features(features: &[f64]) -> Result<(), PredictionValidationError> {
    if features.is_empty() {
        return Err(PredictionValidationError::EmptyFeatures);
    }

    if let Some(index) = features.iter().position(|value| !value.is_finite()) {
        return Err(PredictionValidationError::NonFiniteFeature { index });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("user@example.com").is_ok());
    }

    #[test]
    fn test_empty_username() {
        assert_eq!(
            validate_username(""),
            Err(PredictionValidationError::EmptyUsername)
        );
        assert_eq!(
            validate_username("   "),
            Err(PredictionValidationError::EmptyUsername)
        );
    }

    #[test]
    fn test_username_too_long() {
        let long = "a".repeat(MAX_USERNAME_LENGTH + 1);
        assert!(matches!(
            validate_username(&long),
            Err(PredictionValidationError::UsernameTooLong { .. })
        ));
    }

    #[test]
    fn test_empty_features() {
        assert_eq!(
            validate_features(&[]),
            Err(PredictionValidationError::EmptyFeatures)
        );
    }

    #[test]
    fn test_non_finite_features() {
        assert_eq!(
            validate_features(&[1.0, f64::NAN]),
            Err(PredictionValidationError::NonFiniteFeature { index: 1 })
        );
        assert_eq!(
            validate_features(&[f64::INFINITY]),
            Err(PredictionValidationError::NonFiniteFeature { index: 0 })
        );
    }

    #[test]
    fn test_domain_error_conversion() {
        let shape: DomainError = PredictionValidationError::EmptyFeatures.into();
        assert!(matches!(shape, DomainError::Shape { .. }));

        let validation: DomainError = PredictionValidationError::MissingUsername.into();
        assert!(matches!(validation, DomainError::Validation { .. }));
    }
}
