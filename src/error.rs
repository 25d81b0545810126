//! HTTP 错误处理与响应映射

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::models::ErrorPayload;
use crate::proxy::error_classifier::classify_upstream_error;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Message is required")]
    MessageRequired,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Request body could not be read: {detail}")]
    BodyRejected { status: StatusCode, detail: String },

    #[error("API key is not configured ({env_var} missing)")]
    MissingApiKey { env_var: String, verbose: bool },

    #[error("Upstream API rejected the request: {status}")]
    Upstream { status: StatusCode, body: String },

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to parse upstream response: {0}")]
    Decode(String),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::MessageRequired | RelayError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            RelayError::BodyRejected { status, .. } | RelayError::Upstream { status, .. } => {
                *status
            }
            RelayError::MissingApiKey { .. }
            | RelayError::Transport(_)
            | RelayError::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn payload(&self) -> ErrorPayload {
        match self {
            RelayError::MethodNotAllowed | RelayError::MessageRequired => {
                ErrorPayload::new(self.to_string())
            }
            RelayError::InvalidBody(detail) => {
                ErrorPayload::new("Invalid request body").with_details(detail.clone())
            }
            RelayError::BodyRejected { detail, .. } => {
                ErrorPayload::new("Request body could not be read").with_details(detail.clone())
            }
            RelayError::MissingApiKey { verbose: true, .. } => ErrorPayload::new(self.to_string()),
            RelayError::MissingApiKey { verbose: false, .. } => {
                ErrorPayload::new("Server configuration error")
            }
            RelayError::Upstream { status, body } => {
                // 上游返回 JSON 时原样嵌入, 否则保留原始文本
                let error = if body.trim().is_empty() {
                    Value::String(self.to_string())
                } else {
                    serde_json::from_str::<Value>(body)
                        .unwrap_or_else(|_| Value::String(body.clone()))
                };
                ErrorPayload {
                    error,
                    details: Some(format!("Upstream API rejected the request: {}", status)),
                }
            }
            RelayError::Transport(e) => {
                let (_, details) = classify_upstream_error(e);
                ErrorPayload::new(self.to_string()).with_details(details)
            }
            RelayError::Decode(_) => ErrorPayload::new(self.to_string()),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            RelayError::Transport(e) => {
                let (kind, _) = classify_upstream_error(e);
                tracing::error!(error_kind = kind, "Chat relay failed: {}", self);
            }
            RelayError::Upstream { body, .. } => {
                tracing::error!("Upstream API error: {} - {}", status, body);
            }
            _ if status.is_server_error() => tracing::error!("Chat relay failed: {}", self),
            _ => tracing::warn!("Rejected chat request: {}", self),
        }

        (status, Json(self.payload())).into_response()
    }
}
