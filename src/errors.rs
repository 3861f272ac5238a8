use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::selection::SelectionError;

/// Failure to obtain the fixture document. Fatal for any operation that needs the store.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to fetch fixture: {0}")]
    Fetch(String),

    #[error("failed to parse fixture: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum CreateBookingError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("no booking id left after {}", i64::MAX)]
    IdsExhausted,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("data store unavailable: {0}")]
    Load(#[from] LoadError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("{0}")]
    BookingFailed(&'static str),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CreateBookingError> for AppError {
    fn from(e: CreateBookingError) -> Self {
        match e {
            CreateBookingError::Load(e) => AppError::Load(e),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Load(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Selection(e) => match e {
                SelectionError::DateUnavailable(_) | SelectionError::UnknownSlot(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                SelectionError::NotAuthenticated => StatusCode::UNAUTHORIZED,
                SelectionError::NoDateSelected
                | SelectionError::IncompleteSelection
                | SelectionError::AlreadySubmitting => StatusCode::CONFLICT,
            },
            AppError::BookingFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
