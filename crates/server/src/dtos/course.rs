use database::entities::courses;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct CourseQueryParams {
    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u64,

    /// Matches against course code, title, and description
    pub search: Option<String>,
    pub credits: Option<Vec<i16>>,
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    20
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCourseRequest {
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub credits: i16,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    pub default_capacity: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseResponse {
    pub id: String,
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub credits: i16,
    pub prerequisites: Vec<String>,
    pub default_capacity: i32,
}

impl From<courses::Model> for CourseResponse {
    fn from(course: courses::Model) -> Self {
        // The column is a JSON array of codes; anything else reads as empty
        let prerequisites: Vec<String> = course
            .prerequisites
            .as_array()
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str())
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default();

        CourseResponse {
            id: course.id.to_string(),
            code: course.code,
            title: course.title,
            description: course.description,
            credits: course.credits,
            prerequisites,
            default_capacity: course.default_capacity,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedCoursesResponse {
    pub courses: Vec<CourseResponse>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_prev: bool,
}
