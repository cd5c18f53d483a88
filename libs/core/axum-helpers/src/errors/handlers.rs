use axum::{http::StatusCode, response::Response};

use super::{ErrorCode, error_response};

/// Fallback for unmatched routes, rendered in the standard error envelope.
pub async fn not_found() -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        "The requested resource was not found".to_string(),
        ErrorCode::NotFound,
    )
}

/// Response for requests cut off by the timeout layer.
pub fn request_timeout() -> Response {
    error_response(
        StatusCode::REQUEST_TIMEOUT,
        ErrorCode::RequestTimeout.default_message().to_string(),
        ErrorCode::RequestTimeout,
    )
}
