use crate::dtos::enrollment::{EnrollmentRequest, EnrollmentResponse};
use crate::error::ApiResult;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use database::services::enrollment::EnrollmentService;

/// Enroll a student in a section
#[utoipa::path(
    post,
    path = "/enrollments",
    request_body = EnrollmentRequest,
    responses(
        (status = 201, description = "Enrollment created", body = EnrollmentResponse),
        (status = 404, description = "Student not found"),
        (status = 422, description = "Enrollment rules rejected the request"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Enrollments"
)]
pub async fn enroll(
    State(state): State<AppState>,
    Json(req): Json<EnrollmentRequest>,
) -> ApiResult<(StatusCode, Json<EnrollmentResponse>)> {
    let enrollment_id =
        EnrollmentService::enroll(&state.db, req.student_id, req.section_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(EnrollmentResponse {
            enrollment_id: enrollment_id.to_string(),
        }),
    ))
}

/// Drop an active enrollment and free the seat
#[utoipa::path(
    post,
    path = "/enrollments/drop",
    request_body = EnrollmentRequest,
    responses(
        (status = 204, description = "Enrollment dropped"),
        (status = 404, description = "Not enrolled"),
        (status = 422, description = "Cannot disenroll, grades already submitted"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Enrollments"
)]
pub async fn disenroll(
    State(state): State<AppState>,
    Json(req): Json<EnrollmentRequest>,
) -> ApiResult<StatusCode> {
    EnrollmentService::disenroll(&state.db, req.student_id, req.section_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
