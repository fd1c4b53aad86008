//! Error types for the leaderboard server
//!
//! `ApiError` is what handlers return and maps onto HTTP statuses.
//! `UpstreamError` is what the vendor clients return.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == API Error Enum ==
/// Error taxonomy for HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed request fields
    #[error("{0}")]
    BadRequest(String),

    /// No session, or a session the auth provider rejected
    #[error("{0}")]
    Unauthorized(String),

    /// Caller does not own the resource
    #[error("{0}")]
    Forbidden(String),

    /// Resource does not exist
    #[error("{0}")]
    NotFound(String),

    /// Riot, storage or database failure
    #[error("{0}")]
    Upstream(String),

    /// Internal server error
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

impl From<axum::extract::multipart::MultipartError> for ApiError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        ApiError::BadRequest(format!("Invalid multipart body: {}", err))
    }
}

// == Upstream Error Enum ==
/// Failure talking to Riot, Data Dragon, or the hosted backend.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Transport-level failure
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Vendor answered with a non-success status
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Vendor answered with a body we could not use
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Client is missing configuration it needs
    #[error("not configured: {0}")]
    Config(String),
}

impl UpstreamError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            UpstreamError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Unauthorized("x".into()).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden("x".into()).status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Upstream("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upstream_detail_passthrough() {
        let err: ApiError = UpstreamError::Status {
            status: 503,
            body: "riot maintenance".to_string(),
        }
        .into();

        assert!(matches!(err, ApiError::Upstream(_)));
        assert!(err.to_string().contains("riot maintenance"));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = ApiError::Forbidden("Not your leaderboard".into()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"error": "Not your leaderboard"}));
    }
}
