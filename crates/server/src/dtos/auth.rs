use database::entities::users;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub role: String, // student | professor | admin

    /// Required when role is "student"
    #[serde(default)]
    pub student: Option<StudentPayload>,

    /// Required when role is "professor"
    #[serde(default)]
    pub professor: Option<ProfessorPayload>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StudentPayload {
    pub student_number: String,
    pub major: String,
    pub year_level: i16,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProfessorPayload {
    pub employee_number: String,
    pub department: String,
    pub position: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub active: bool,
}

impl From<users::Model> for UserResponse {
    fn from(user: users::Model) -> Self {
        UserResponse {
            id: user.id.to_string(),
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            active: user.active,
        }
    }
}
