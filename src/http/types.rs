use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use validator::ValidationErrors;

use crate::domain::error::TodoError;

/// Error body: `{"detail": "..."}`, plus per-field `errors` for validation failures.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("validation failed")]
    Validation(#[from] ValidationErrors),

    /// Framework-level rejection (bad path, query or body), kept with its status.
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::ListNotFound(_) | TodoError::ItemNotFound(..) => ApiError::NotFound(err.to_string()),
            TodoError::Storage(e) => ApiError::Internal(e),
        }
    }
}

impl ApiError {
    pub fn unprocessable(detail: impl Into<String>) -> Self {
        ApiError::Rejected { status: StatusCode::UNPROCESSABLE_ENTITY, detail: detail.into() }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Rejected { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(errors) => ErrorBody { detail: "validation failed".into(), errors: Some(errors) },
            ApiError::Internal(e) => {
                tracing::error!(error = ?e, "internal error");
                ErrorBody { detail: "Internal server error".into(), errors: None }
            }
            other => ErrorBody { detail: other.to_string(), errors: None },
        };
        (status, axum::Json(body)).into_response()
    }
}
