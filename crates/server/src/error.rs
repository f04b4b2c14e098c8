use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use database::error::{RegistrarError, ValidationError};
use log::error;
use serde_json::json;

/// Translates engine outcomes into HTTP responses. Validation failures
/// surface their stable reason strings; storage failures are logged and
/// answered with an opaque 500.
pub enum ApiError {
    Registrar(RegistrarError),
    BadRequest(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<RegistrarError> for ApiError {
    fn from(err: RegistrarError) -> Self {
        Self::Registrar(err)
    }
}

fn validation_status(err: &ValidationError) -> StatusCode {
    match err {
        ValidationError::UserNotFound
        | ValidationError::StudentNotFound
        | ValidationError::ProfessorNotFound
        | ValidationError::CourseNotFound
        | ValidationError::SectionNotFound
        | ValidationError::NotEnrolled => StatusCode::NOT_FOUND,
        ValidationError::DuplicateUser
        | ValidationError::DuplicateCourse
        | ValidationError::DuplicateSection => StatusCode::CONFLICT,
        ValidationError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(reason) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": reason })),
            )
                .into_response(),
            Self::Registrar(RegistrarError::Validation(err)) => {
                (validation_status(&err), Json(json!({ "error": err.to_string() })))
                    .into_response()
            }
            Self::Registrar(err) => {
                error!("request failed: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
