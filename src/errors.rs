use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::validation::Validation;

pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation {
        errors: FieldErrors,
        warnings: FieldErrors,
    },

    #[error("backend request failed: {0:#}")]
    Transport(#[from] anyhow::Error),

    /// The backend answered `success: false`; the message is shown as is.
    #[error("{0}")]
    Rejected(String),

    #[error("unexpected backend response: {0}")]
    Decode(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("conflict: {0}")]
    Conflict(String),
}

impl AppError {
    pub fn invalid(errors: impl IntoIterator<Item = (impl Into<String>, String)>) -> Self {
        AppError::Validation {
            errors: errors.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            warnings: FieldErrors::new(),
        }
    }
}

impl From<Validation> for AppError {
    fn from(v: Validation) -> Self {
        let keyed = |m: BTreeMap<crate::models::Field, String>| {
            m.into_iter()
                .map(|(f, msg)| (f.as_str().to_string(), msg))
                .collect::<FieldErrors>()
        };
        AppError::Validation {
            errors: keyed(v.errors),
            warnings: keyed(v.warnings),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Please correct the highlighted fields".to_string(),
            ),
            AppError::Transport(e) => {
                tracing::error!(error = %format!("{e:#}"), "backend request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "Could not reach the server. Please try again.".to_string(),
                )
            }
            AppError::Rejected(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Decode(detail) => {
                tracing::error!(%detail, "unexpected backend response");
                (
                    StatusCode::BAD_GATEWAY,
                    "Unexpected response from server".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
        };

        let mut body = serde_json::json!({ "success": false, "message": message });
        if let AppError::Validation { errors, warnings } = &self {
            body["errors"] = serde_json::json!(errors);
            if !warnings.is_empty() {
                body["warnings"] = serde_json::json!(warnings);
            }
        }
        (status, axum::Json(body)).into_response()
    }
}
