use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// One validation failure, tied to the request field that caused it.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AccountError {
    /// Request body failed schema validation; nothing was written.
    #[error("request validation failed")]
    Validation(Vec<FieldError>),

    /// Another account already owns this email.
    #[error("User with this email already exists")]
    EmailTaken,

    /// Data store or other infrastructure failure.
    #[error("internal error: {0}")]
    Store(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldError>>,
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AccountError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message: "Request validation failed".to_string(),
                    errors: Some(errors),
                },
            ),
            AccountError::EmailTaken => (
                StatusCode::CONFLICT,
                ErrorBody {
                    message: "User with this email already exists".to_string(),
                    errors: None,
                },
            ),
            AccountError::Store(e) => {
                error!(error = %e, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        message: "Internal server error".to_string(),
                        errors: None,
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
