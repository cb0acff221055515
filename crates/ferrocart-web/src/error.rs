use std::io;
use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ferrocart_commands::PlatformError;
use ferrocart_core::{CoreError, DispatchError};
use serde::Serialize;
use thiserror::Error;

/// JSON error response.
///
/// Every error returned by the HTTP layer serialises as:
/// ```json
/// { "ok": false, "error": { "code": "<code>", "message": "<message>", "available": [] } }
/// ```
/// `available` is omitted when there are no alternatives to suggest.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ApiErrorResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorResponse {
    pub ok: bool,
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub available: Vec<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiErrorResponse {
                ok: false,
                error: ApiErrorBody {
                    code: code.into(),
                    message: message.into(),
                    available: Vec::new(),
                },
            },
        }
    }

    pub fn with_available(mut self, available: Vec<String>) -> Self {
        self.body.error.available = available;
        self
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Unknown command paths are 404, deadline overruns 504, everything else 500.
impl From<PlatformError> for ApiError {
    fn from(error: PlatformError) -> Self {
        let status = match &error {
            PlatformError::Dispatch(DispatchError::CommandNotFound { .. }) => StatusCode::NOT_FOUND,
            PlatformError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            PlatformError::Dispatch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let available = match &error {
            PlatformError::Dispatch(dispatch) => dispatch.available().to_vec(),
            PlatformError::Timeout { .. } => Vec::new(),
        };
        Self::new(status, error.code(), error.to_string()).with_available(available)
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        Self::internal(error.to_string())
    }
}

/// Failure to start or run the HTTP server.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] io::Error),
}
