use crate::dtos::CreatedResponse;
use crate::dtos::section::{
    CreateSectionRequest, EndTermRequest, EndTermResponse, GradeSubmissionRequest,
    SectionDetailResponse, SectionQueryParams, SectionResponse, SetStatusRequest,
};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use database::services::catalog::{CatalogService, NewSection};
use database::services::grading::{GradeActor, GradeService};
use models::grade::LetterGrade;
use models::status::SectionStatus;
use models::term::Term;
use sea_orm::prelude::Uuid;
use std::collections::HashMap;

/// List sections, optionally filtered by term or course
#[utoipa::path(
    get,
    path = "/sections",
    params(SectionQueryParams),
    responses(
        (status = 200, description = "List of sections retrieved successfully", body = [SectionResponse]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Sections"
)]
pub async fn list_sections(
    State(state): State<AppState>,
    Query(params): Query<SectionQueryParams>,
) -> ApiResult<Json<Vec<SectionResponse>>> {
    let sections =
        CatalogService::list_sections(&state.db, params.semester, params.year, params.course_id)
            .await?;

    Ok(Json(
        sections.into_iter().map(SectionResponse::from).collect(),
    ))
}

/// Schedule a new section of a course
#[utoipa::path(
    post,
    path = "/sections",
    request_body = CreateSectionRequest,
    responses(
        (status = 201, description = "Section created", body = CreatedResponse),
        (status = 404, description = "Course or professor not found"),
        (status = 409, description = "Section already exists for this term"),
        (status = 422, description = "Invalid schedule"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Sections"
)]
pub async fn create_section(
    State(state): State<AppState>,
    Json(req): Json<CreateSectionRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let section_id = CatalogService::create_section(
        &state.db,
        NewSection {
            course_id: req.course_id,
            professor_id: req.professor_id,
            section_number: req.section_number,
            semester: req.semester,
            year: req.year,
            schedule: req.schedule,
            room: req.room,
            capacity: req.capacity,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: section_id.to_string(),
        }),
    ))
}

/// Get a section with its course and professor
#[utoipa::path(
    get,
    path = "/sections/{id}",
    params(
        ("id" = Uuid, Path, description = "Section ID")
    ),
    responses(
        (status = 200, description = "Section found", body = SectionDetailResponse),
        (status = 404, description = "Section not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Sections"
)]
pub async fn get_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SectionDetailResponse>> {
    let detail = CatalogService::get_section_detail(&state.db, id).await?;
    Ok(Json(detail.into()))
}

/// Open or close a section for enrollment
#[utoipa::path(
    patch,
    path = "/sections/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Section ID")
    ),
    request_body = SetStatusRequest,
    responses(
        (status = 204, description = "Status updated"),
        (status = 404, description = "Section not found"),
        (status = 422, description = "Unknown status"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Sections"
)]
pub async fn set_section_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetStatusRequest>,
) -> ApiResult<StatusCode> {
    let status: SectionStatus = req
        .status
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("unknown status: {}", req.status)))?;

    CatalogService::set_section_status(&state.db, id, status).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Post a batch of letter grades for a section, all-or-nothing
#[utoipa::path(
    post,
    path = "/sections/{id}/grades",
    params(
        ("id" = Uuid, Path, description = "Section ID")
    ),
    request_body = GradeSubmissionRequest,
    responses(
        (status = 204, description = "Grades posted"),
        (status = 404, description = "Section not found"),
        (status = 422, description = "Unknown grade or enrollment, or semester already ended"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Sections"
)]
pub async fn submit_grades(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<GradeSubmissionRequest>,
) -> ApiResult<StatusCode> {
    let mut grades: HashMap<Uuid, LetterGrade> = HashMap::with_capacity(req.grades.len());
    for (enrollment_id, letter) in req.grades {
        let grade: LetterGrade = letter
            .parse()
            .map_err(|_| ApiError::BadRequest(format!("unknown grade: {letter}")))?;
        grades.insert(enrollment_id, grade);
    }

    let actor = if req.admin_override {
        GradeActor::Admin
    } else {
        GradeActor::Professor
    };

    GradeService::submit_grades(&state.db, id, &grades, actor).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// End a term: locks disenrollment and professor grading for all of its
/// sections
#[utoipa::path(
    post,
    path = "/terms/end",
    request_body = EndTermRequest,
    responses(
        (status = 200, description = "Term ended", body = EndTermResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Sections"
)]
pub async fn end_term(
    State(state): State<AppState>,
    Json(req): Json<EndTermRequest>,
) -> ApiResult<Json<EndTermResponse>> {
    let term = Term {
        semester: req.semester,
        year: req.year,
    };
    let sections_ended = CatalogService::end_term(&state.db, &term).await?;
    Ok(Json(EndTermResponse { sections_ended }))
}
