//! Invocation payload and its conversion into a typed request

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::prediction::{
    PredictionRequest, PredictionValidationError, UserIdentity, Username,
};

/// Raw invocation body: `{ "X": [...], "user": { "username": ..., "age": ... } }`
///
/// Every field is optional here so that absent fields are reported as
/// validation failures rather than generic deserialization errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvocationPayload {
    #[serde(rename = "X", default)]
    pub x: Option<Value>,
    #[serde(default)]
    pub user: Option<UserPayload>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPayload {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
}

impl TryFrom<InvocationPayload> for PredictionRequest {
    type Error = PredictionValidationError;

    fn try_from(payload: InvocationPayload) -> Result<Self, Self::Error> {
        let user = payload.user.ok_or(PredictionValidationError::MissingUser)?;
        let username = user
            .username
            .ok_or(PredictionValidationError::MissingUsername)?;
        let age = user.age.ok_or(PredictionValidationError::MissingAge)?;
        let identity = UserIdentity::new(Username::new(username)?, age);

        let x = payload
            .x
            .filter(|v| !v.is_null())
            .ok_or(PredictionValidationError::MissingFeatures)?;

        PredictionRequest::new(identity, flatten_features(&x)?)
    }
}

/// Flatten `X` row-major into one feature per row
///
/// Accepts a flat sequence of numbers or a rectangular sequence of numeric rows.
pub fn flatten_features(x: &Value) -> Result<Vec<f64>, PredictionValidationError> {
    let items = x.as_array().ok_or(PredictionValidationError::NotASequence)?;

    if items.iter().all(Value::is_array) && !items.is_empty() {
        return flatten_rows(items);
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_f64()
                .ok_or(PredictionValidationError::NonNumericFeature { index })
        })
        .collect()
}

fn flatten_rows(rows: &[Value]) -> Result<Vec<f64>, PredictionValidationError> {
    let mut features = Vec::new();
    let mut expected = None;

    for (row_index, row) in rows.iter().enumerate() {
        let cells = row.as_array().ok_or(PredictionValidationError::NotASequence)?;

        let width = *expected.get_or_insert(cells.len());
        if cells.len() != width {
            return Err(PredictionValidationError::RaggedFeatures {
                row: row_index,
                expected: width,
                found: cells.len(),
            });
        }

        for cell in cells {
            let value = cell.as_f64().ok_or(PredictionValidationError::NonNumericFeature {
                index: features.len(),
            })?;
            features.push(value);
        }
    }

    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> InvocationPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_payload() {
        let request = PredictionRequest::try_from(payload(json!({
            "X": [1.0, 2, 3.5],
            "user": { "username": "alice", "age": 34 }
        })))
        .unwrap();

        assert_eq!(request.features(), &[1.0, 2.0, 3.5]);
        assert_eq!(request.identity().username.as_str(), "alice");
        assert_eq!(request.identity().age, 34);
    }

    #[test]
    fn test_column_payload_is_flattened() {
        let request = PredictionRequest::try_from(payload(json!({
            "X": [[1.0], [2.0], [3.0]],
            "user": { "username": "alice", "age": 34 }
        })))
        .unwrap();

        assert_eq!(request.features(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_missing_username() {
        let result = PredictionRequest::try_from(payload(json!({
            "X": [1.0],
            "user": { "age": 34 }
        })));

        assert_eq!(result, Err(PredictionValidationError::MissingUsername));
    }

    #[test]
    fn test_missing_user_and_age() {
        let no_user = PredictionRequest::try_from(payload(json!({ "X": [1.0] })));
        assert_eq!(no_user, Err(PredictionValidationError::MissingUser));

        let no_age = PredictionRequest::try_from(payload(json!({
            "X": [1.0],
            "user": { "username": "alice" }
        })));
        assert_eq!(no_age, Err(PredictionValidationError::MissingAge));
    }

    #[test]
    fn test_empty_features() {
        let result = PredictionRequest::try_from(payload(json!({
            "X": [],
            "user": { "username": "alice", "age": 34 }
        })));

        assert_eq!(result, Err(PredictionValidationError::EmptyFeatures));
    }

    #[test]
    fn test_missing_and_null_features() {
        let user = json!({ "username": "alice", "age": 34 });

        let missing = PredictionRequest::try_from(payload(json!({ "user": user.clone() })));
        assert_eq!(missing, Err(PredictionValidationError::MissingFeatures));

        let null = PredictionRequest::try_from(payload(json!({ "X": null, "user": user })));
        assert_eq!(null, Err(PredictionValidationError::MissingFeatures));
    }

    #[test]
    fn test_non_numeric_feature() {
        assert_eq!(
            flatten_features(&json!([1.0, "two", 3.0])),
            Err(PredictionValidationError::NonNumericFeature { index: 1 })
        );
        assert_eq!(
            flatten_features(&json!([[1.0], [null]])),
            Err(PredictionValidationError::NonNumericFeature { index: 1 })
        );
    }

    #[test]
    fn test_mixed_and_ragged_rows() {
        assert_eq!(
            flatten_features(&json!([[1.0, 2.0], [3.0]])),
            Err(PredictionValidationError::RaggedFeatures {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            flatten_features(&json!([1.0, [2.0]])),
            Err(PredictionValidationError::NonNumericFeature { index: 1 })
        );
    }

    #[test]
    fn test_scalar_is_not_a_sequence() {
        assert_eq!(
            flatten_features(&json!(5.0)),
            Err(PredictionValidationError::NotASequence)
        );
    }
}
