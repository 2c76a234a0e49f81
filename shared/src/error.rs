use lambda_http::http::StatusCode;
use serde_json::json;

use crate::response::ApiResponse;

/// Failure talking to the users table
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("DynamoDB {operation} failed: {message}")]
    Dynamo {
        operation: &'static str,
        message: String,
    },
    #[error("Store returned an unreadable item: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn dynamo<E>(operation: &'static str, err: E) -> Self
    where
        E: std::error::Error,
    {
        Self::Dynamo {
            operation,
            message: aws_sdk_dynamodb::error::DisplayErrorContext(err).to_string(),
        }
    }
}

/// Anything that ends a request early with an error body
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request body is required")]
    MissingBody,
    #[error("Invalid JSON in request body")]
    InvalidJson(#[source] serde_json::Error),
    #[error("Invalid request body: {0}")]
    InvalidBody(#[source] serde_json::Error),
    #[error("Path parameter userid is required")]
    MissingUserId,
    #[error("Internal server error")]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn into_response(self) -> ApiResponse {
        match &self {
            Self::Store(e) => tracing::error!("Store failure: {}", e),
            other => tracing::warn!("Rejected request: {:?}", other),
        }
        ApiResponse::new(self.status(), json!({ "Error": self.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_400() {
        let resp = ApiError::MissingBody.into_response();
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.body, json!({"Error": "Request body is required"}));
    }

    #[test]
    fn test_store_errors_hide_detail() {
        let err = ApiError::from(StoreError::Dynamo {
            operation: "PutItem",
            message: "ResourceNotFoundException: table users not found".to_string(),
        });
        let resp = err.into_response();
        assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp.body, json!({"Error": "Internal server error"}));
    }

    #[test]
    fn test_invalid_body_carries_serde_detail() {
        let source = serde_json::from_str::<u8>("\"x\"").unwrap_err();
        let msg = ApiError::InvalidBody(source).to_string();
        assert!(msg.starts_with("Invalid request body: invalid type"));
    }
}
