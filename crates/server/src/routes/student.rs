use crate::dtos::student::{
    GpaResponse, ScheduleEntryResponse, ScheduleQueryParams, ScheduleResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use database::services::reporting::ReportingService;
use models::term::Term;
use sea_orm::prelude::Uuid;

/// Credit-weighted GPA over the student's graded enrollments
#[utoipa::path(
    get,
    path = "/students/{id}/gpa",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "GPA computed", body = GpaResponse),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn get_gpa(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<GpaResponse>> {
    let gpa = ReportingService::gpa(&state.db, id).await?;
    Ok(Json(GpaResponse {
        student_id: id.to_string(),
        gpa,
    }))
}

/// The student's active schedule for one term
#[utoipa::path(
    get,
    path = "/students/{id}/schedule",
    params(
        ("id" = Uuid, Path, description = "Student ID"),
        ScheduleQueryParams
    ),
    responses(
        (status = 200, description = "Schedule retrieved", body = ScheduleResponse),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<ScheduleQueryParams>,
) -> ApiResult<Json<ScheduleResponse>> {
    let term = Term {
        semester: params.semester,
        year: params.year,
    };
    let entries = ReportingService::schedule(&state.db, id, &term).await?;

    Ok(Json(ScheduleResponse {
        entries: entries
            .into_iter()
            .map(ScheduleEntryResponse::from)
            .collect(),
    }))
}
