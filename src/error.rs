use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Custom error type for the proxy endpoints
///
/// Every variant is turned directly into an HTTP response; nothing is
/// retried or recovered internally.
#[derive(Debug)]
pub enum ApiError {
    /// Required `orderId` path parameter was empty
    MissingOrderId,
    /// `orderId` cannot be used as a single upstream path segment
    InvalidOrderId(String),
    /// Path parameters could not be extracted (e.g. not valid UTF-8)
    InvalidPath { status: StatusCode, message: String },
    /// The upstream exchange itself failed (connect, TLS, timeout, body read)
    Upstream(anyhow::Error),
    /// Upstream answered with something other than 200
    UpstreamStatus {
        status: StatusCode,
        body: String,
        /// Reply with the upstream status rather than 500
        passthrough: bool,
    },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingOrderId | ApiError::InvalidOrderId(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidPath { status, .. } => *status,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::UpstreamStatus { status, passthrough, .. } => {
                if !passthrough {
                    StatusCode::INTERNAL_SERVER_ERROR
                } else if status.is_client_error() || status.is_server_error() {
                    *status
                } else {
                    StatusCode::BAD_GATEWAY
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = match self {
            ApiError::MissingOrderId => "orderId is required".to_string(),
            ApiError::InvalidOrderId(reason) => format!("Invalid orderId: {}", reason),
            ApiError::InvalidPath { message, .. } => format!("Invalid path parameter: {}", message),
            ApiError::Upstream(err) => format!("Upstream API call failed: {:#}", err),
            ApiError::UpstreamStatus { status, body, .. } => format!(
                "Upstream API returned unexpected status: {}\nBody: {}",
                status.as_u16(),
                body
            ),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidPath {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Upstream(err)
    }
}
