//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use tracing::warn;

/// Message for rejected item IDs.
pub const INVALID_ID_MESSAGE: &str = "Invalid driveItem ID.";
/// Message when nothing more specific can be shown.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";

/// API error type.
///
/// Every variant renders as `{"error": ...}` and none of them carries a
/// `Cache-Control` header.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid item identifier")]
    InvalidIdentifier,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("upstream error: {status}")]
    Upstream { status: StatusCode, body: Value },

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidIdentifier | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { status, .. } => *status,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body sent for this error: `{"error": ...}`.
    pub fn body(&self) -> Value {
        let payload = match self {
            Self::InvalidIdentifier => json!(INVALID_ID_MESSAGE),
            Self::BadRequest(message) => json!(message),
            Self::Upstream { body, .. } => body.clone(),
            Self::Internal(_) => json!(INTERNAL_ERROR_MESSAGE),
        };
        json!({ "error": payload })
    }
}

impl From<driveindex_common::Error> for ApiError {
    fn from(err: driveindex_common::Error) -> Self {
        use driveindex_common::Error;

        match err {
            Error::InvalidIdentifier(_) => Self::InvalidIdentifier,
            Error::Upstream { status, body } => match StatusCode::from_u16(status) {
                Ok(status) if status.is_client_error() || status.is_server_error() => {
                    Self::Upstream { status, body }
                }
                _ => Self::Internal(format!("unexpected upstream status {}", status)),
            },
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            Self::Upstream { .. } => warn!(%status, "Upstream request failed"),
            Self::Internal(detail) => warn!(error = %detail, "Request failed"),
            _ => {}
        }
        (status, Json(self.body())).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use driveindex_common::Error;

    #[test]
    fn test_invalid_identifier_is_400() {
        let err = ApiError::from(Error::InvalidIdentifier("x!".to_string()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_status_kept() {
        let err = ApiError::from(Error::Upstream {
            status: 403,
            body: json!({ "error": { "code": "accessDenied" } }),
        });
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_non_error_upstream_status_becomes_500() {
        let err = ApiError::from(Error::Upstream {
            status: 302,
            body: Value::Null,
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_body_shapes() {
        assert_eq!(
            ApiError::InvalidIdentifier.body(),
            json!({ "error": "Invalid driveItem ID." })
        );
        assert_eq!(
            ApiError::Internal("token store down".to_string()).body(),
            json!({ "error": "Internal server error." })
        );
        let upstream = json!({ "error": { "code": "itemNotFound" } });
        assert_eq!(
            ApiError::Upstream {
                status: StatusCode::NOT_FOUND,
                body: upstream.clone(),
            }
            .body(),
            json!({ "error": upstream })
        );
    }

    #[test]
    fn test_network_and_auth_are_500() {
        for err in [
            Error::Network("connection refused".to_string()),
            Error::Authentication("expired".to_string()),
        ] {
            assert_eq!(
                ApiError::from(err).status_code(),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }
}
