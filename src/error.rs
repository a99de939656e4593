use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::item_store::StoreError;

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Maps item store failures and request decoding problems onto HTTP status
/// codes, rendered as a JSON `{"error": ...}` body.
#[derive(Debug)]
pub enum ApiError {
    /// Path id is not a positive integer
    InvalidId(String),
    /// Request body could not be decoded as an item
    InvalidBody(String),
    /// Item store operation failed
    Store(StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::InvalidId(id) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid item id: expected a positive integer, got '{}'", id),
            ),
            ApiError::InvalidBody(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid item body: {}", msg),
            ),
            ApiError::Store(StoreError::NotFound(id)) => (
                StatusCode::NOT_FOUND,
                format!("Item not found: {}", id),
            ),
            ApiError::Store(err @ StoreError::Encoding(_)) => (
                StatusCode::BAD_REQUEST,
                format!("Encoding error: {}", err),
            ),
            ApiError::Store(err) => {
                tracing::error!("Store error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Store error: {}", err),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

/// Parse a path segment into an item id
pub fn parse_item_id(raw: &str) -> Result<u64, ApiError> {
    match raw.parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::InvalidId(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::KvError;

    #[test]
    fn test_parse_item_id() {
        assert_eq!(parse_item_id("1").unwrap(), 1);
        assert_eq!(parse_item_id("12345").unwrap(), 12345);
        assert!(matches!(parse_item_id("0"), Err(ApiError::InvalidId(_))));
        assert!(matches!(parse_item_id("-3"), Err(ApiError::InvalidId(_))));
        assert!(matches!(parse_item_id("abc"), Err(ApiError::InvalidId(_))));
        assert!(matches!(parse_item_id(""), Err(ApiError::InvalidId(_))));
    }

    #[test]
    fn test_status_mapping() {
        let status = |err: ApiError| err.into_response().status();

        assert_eq!(status(ApiError::InvalidId("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status(ApiError::InvalidBody("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status(StoreError::NotFound(1).into()), StatusCode::NOT_FOUND);

        let decode_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(status(StoreError::Encoding(decode_err).into()), StatusCode::BAD_REQUEST);

        let unavailable = StoreError::Unavailable(KvError::Connection("down".into()));
        assert_eq!(status(unavailable.into()), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            status(StoreError::StaleKey("item:1".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
