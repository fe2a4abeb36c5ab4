use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::error::StoreError;
use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, self.to_string()),
            ApiError::Store(err) => match err {
                StoreError::DuplicateRegistration { .. } | StoreError::NonMonotonicUpdate { .. } => {
                    (StatusCode::CONFLICT, err.to_string())
                }
                StoreError::UnknownUser(_) | StoreError::UnknownWallet { .. } => {
                    (StatusCode::NOT_FOUND, err.to_string())
                }
                StoreError::ConstraintViolation(_) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
                }
                // Storage detail stays in the logs, not in responses.
                StoreError::TransientStorage(_) => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Storage temporarily unavailable".to_string(),
                ),
                StoreError::PermanentStorage(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage error occurred".to_string(),
                ),
            },
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_expected_statuses() {
        let cases = [
            (
                ApiError::Store(StoreError::DuplicateRegistration {
                    wallet_address: "0xabc".to_string(),
                    user_id: 1,
                }),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::Store(StoreError::UnknownUser(7)),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::Store(StoreError::NonMonotonicUpdate {
                    wallet_address: "0xabc".to_string(),
                    current: 100,
                    submitted: 50,
                }),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::Store(StoreError::ConstraintViolation("boom".to_string())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
