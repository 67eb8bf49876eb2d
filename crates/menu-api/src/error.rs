use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use validator::ValidationErrors;

use menu_core::DomainError;

use crate::response::ApiResponse;

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::MenuItemNotFound(_) | DomainError::MenuRootNotFound(_) => {
                ApiError::NotFound(message)
            }
            DomainError::MenuRootAlreadyExists(_) => ApiError::Conflict(message),
            DomainError::CyclicHierarchy(_)
            | DomainError::DuplicateMenuItem(_)
            | DomainError::HierarchyTooDeep { .. } => ApiError::Unprocessable(message),
            DomainError::ParentNotFound(_) => ApiError::BadRequest(message),
            DomainError::ValidationError(_) => ApiError::Validation(message),
            DomainError::DatabaseError(_) => ApiError::DatabaseError(message),
            DomainError::InternalError(_) => ApiError::InternalError(message),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "NOT_FOUND", msg)
            },
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg)
            },
            ApiError::Validation(msg) => {
                tracing::warn!("Validation error: {}", msg);
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg)
            },
            ApiError::Conflict(msg) => {
                tracing::warn!("Conflict: {}", msg);
                (StatusCode::CONFLICT, "CONFLICT", msg)
            },
            ApiError::Unprocessable(msg) => {
                tracing::warn!("Unprocessable: {}", msg);
                (StatusCode::UNPROCESSABLE_ENTITY, "MALFORMED_HIERARCHY", msg)
            },
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR", msg)
            },
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg)
            },
        };

        (status, Json(ApiResponse::<()>::error(code, message))).into_response()
    }
}
