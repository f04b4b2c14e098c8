use crate::dtos::CreatedResponse;
use crate::dtos::course::{
    CourseQueryParams, CourseResponse, CreateCourseRequest, PaginatedCoursesResponse,
    PaginationMeta,
};
use crate::error::ApiResult;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use database::services::catalog::{CatalogService, NewCourse};
use sea_orm::prelude::Uuid;

/// Get the paginated course catalog
#[utoipa::path(
    get,
    path = "/courses",
    params(CourseQueryParams),
    responses(
        (status = 200, description = "List of courses retrieved successfully", body = PaginatedCoursesResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn list_courses(
    State(state): State<AppState>,
    Query(params): Query<CourseQueryParams>,
) -> ApiResult<Json<PaginatedCoursesResponse>> {
    let (courses, total_items) = CatalogService::list_courses(
        &state.db,
        params.page,
        params.per_page,
        params.search,
        params.credits,
    )
    .await?;

    let total_pages = total_items.div_ceil(params.per_page);
    let pagination = PaginationMeta {
        page: params.page,
        per_page: params.per_page,
        total_pages,
        total_items,
        has_next: params.page < total_pages,
        has_prev: params.page > 1,
    };

    Ok(Json(PaginatedCoursesResponse {
        courses: courses.into_iter().map(CourseResponse::from).collect(),
        pagination,
    }))
}

/// Add a course to the catalog
#[utoipa::path(
    post,
    path = "/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CreatedResponse),
        (status = 409, description = "Course code already in use"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn create_course(
    State(state): State<AppState>,
    Json(req): Json<CreateCourseRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let course_id = CatalogService::create_course(
        &state.db,
        NewCourse {
            code: req.code,
            title: req.title,
            description: req.description,
            credits: req.credits,
            prerequisites: req.prerequisites,
            default_capacity: req.default_capacity.unwrap_or(30),
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: course_id.to_string(),
        }),
    ))
}

/// Get a specific course by ID
#[utoipa::path(
    get,
    path = "/courses/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course found", body = CourseResponse),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Courses"
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<CourseResponse>> {
    let course = CatalogService::get_course(&state.db, id).await?;
    Ok(Json(course.into()))
}
