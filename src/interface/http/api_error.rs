use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::domain::errors::DomainError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn from_domain(error: DomainError) -> Self {
        let status = match &error {
            invalid if invalid.is_validation() => StatusCode::BAD_REQUEST,
            DomainError::NotFound => StatusCode::NOT_FOUND,
            DomainError::Conflict => StatusCode::CONFLICT,
            DomainError::Storage(detail) => {
                error!(detail = %detail, "request failed on the patient store");
                return Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error interno del servidor",
                );
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        Self::new(status, error.to_string())
    }

    /// Unreadable JSON is a 400; other rejections (wrong content type, oversized body) keep their status.
    pub fn from_rejection(rejection: JsonRejection) -> Self {
        let status = match &rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                StatusCode::BAD_REQUEST
            }
            other => other.status(),
        };

        Self::new(status, rejection.body_text())
    }

    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<DomainError> for ApiError {
    fn from(value: DomainError) -> Self {
        Self::from_domain(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}
