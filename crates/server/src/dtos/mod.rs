pub mod auth;
pub mod course;
pub mod enrollment;
pub mod section;
pub mod student;

use serde::Serialize;
use utoipa::ToSchema;

/// Standard body for creation endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedResponse {
    pub id: String,
}
