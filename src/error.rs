use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

/// Failure of a single outbound call to Spotify or the completion API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network failure, TLS failure or an unreadable body.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// The upstream answered with a non-success status.
    #[error("upstream returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    /// The upstream answered 2xx but the body did not match the expected shape.
    #[error("failed to decode upstream response: {0}")]
    Decode(#[from] serde_json::Error),
    /// A credential needed for the call is not configured.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(e) => e.status(),
            _ => None,
        }
    }

    /// The upstream body parsed as JSON, falling back to the raw text.
    pub fn details(&self) -> Value {
        match self {
            ApiError::Status { body, .. } => parse_details(body),
            other => Value::String(other.to_string()),
        }
    }
}

/// Parses an upstream body as JSON, keeping the raw text when it is not JSON.
pub fn parse_details(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

/// Errors surfaced to HTTP callers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required fields")]
    MissingFields { received: Option<Value> },
    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),
    #[error("{message}")]
    Unauthorized {
        message: String,
        details: Option<Value>,
    },
    #[error("Token exchange failed with status {status}")]
    TokenExchange { status: u16, response: String },
    #[error("{message}")]
    Upstream {
        message: String,
        status: u16,
        details: Value,
    },
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingFields { .. } | AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::TokenExchange { .. } | AppError::Upstream { .. } | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn body(&self) -> Value {
        match self {
            AppError::MissingFields { received } => {
                let mut body = json!({ "error": "Missing required fields" });
                if let Some(received) = received {
                    body["received"] = received.clone();
                }
                body
            }
            AppError::InvalidBody(msg) => json!({
                "error": "Invalid JSON body",
                "details": msg,
            }),
            AppError::Unauthorized { message, details } => {
                let mut body = json!({ "error": message });
                if let Some(details) = details {
                    body["details"] = details.clone();
                }
                body
            }
            AppError::TokenExchange { status, response } => json!({
                "error": "Token exchange failed",
                "status": status,
                "response": response,
                "details": parse_details(response),
            }),
            AppError::Upstream {
                message,
                status,
                details,
            } => json!({
                "error": message,
                "status": status,
                "details": details,
            }),
            AppError::Internal(msg) => json!({
                "error": "Internal server error",
                "details": msg,
            }),
        }
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        match err.status() {
            Some(StatusCode::UNAUTHORIZED) => AppError::Unauthorized {
                message: "Upstream authorization failed".to_string(),
                details: Some(err.details()),
            },
            Some(status) => AppError::Upstream {
                message: "Upstream request failed".to_string(),
                status: status.as_u16(),
                details: err.details(),
            },
            None => AppError::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        (status, Json(self.body())).into_response()
    }
}

/// An [`AppError`] returned by the generation endpoint, whose bodies always
/// carry `"success": false`.
#[derive(Debug)]
pub struct GenerationError(pub AppError);

impl From<AppError> for GenerationError {
    fn from(err: AppError) -> Self {
        GenerationError(err)
    }
}

impl IntoResponse for GenerationError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        let mut body = self.0.body();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "playlist generation failed");
        }
        body["success"] = Value::Bool(false);

        (status, Json(body)).into_response()
    }
}
