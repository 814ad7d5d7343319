//! Typed prediction request

use serde::{Deserialize, Serialize};

use super::validation::{validate_features, validate_username, PredictionValidationError};

/// Username - the partition key of a prediction record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Create a new Username after validation
    pub fn new(username: impl Into<String>) -> Result<Self, PredictionValidationError> {
        let username = username.into();
        validate_username(&username)?;
        Ok(Self(username))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = PredictionValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(username: Username) -> Self {
        username.0
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of the user a prediction is made for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub username: Username,
    pub age: i64,
}

impl UserIdentity {
    pub fn new(username: Username, age: i64) -> Self {
        Self { username, age }
    }
}

/// A validated prediction request
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    identity: UserIdentity,
    features: Vec<f64>,
}

impl PredictionRequest {
    /// Create a request, rejecting empty or non-finite features
    pub fn new(
        identity: UserIdentity,
        features: Vec<f64>,
    ) -> Result<Self, PredictionValidationError> {
        validate_features(&features)?;
        Ok(Self { identity, features })
    }

    pub fn identity(&self) -> &UserIdentity {
        &self.identity
    }

    pub fn features(&self) -> &[f64] {
        &self.features
    }
}
