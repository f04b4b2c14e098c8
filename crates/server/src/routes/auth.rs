use crate::dtos::CreatedResponse;
use crate::dtos::auth::{LoginRequest, RegisterRequest, UserResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use database::services::account::{AccountService, NewIdentity, NewProfessor, NewStudent};
use models::role::UserRole;

/// Create a user account with a role-specific payload
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = CreatedResponse),
        (status = 409, description = "Username or email already in use"),
        (status = 422, description = "Invalid registration payload"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let role: UserRole = req
        .role
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("unknown role: {}", req.role)))?;

    let identity = NewIdentity {
        username: req.username,
        email: req.email,
        first_name: req.first_name,
        last_name: req.last_name,
        password: req.password,
    };

    let user_id = match role {
        UserRole::Student => {
            let payload = req
                .student
                .ok_or_else(|| ApiError::BadRequest("student payload required".to_string()))?;
            AccountService::register_student(
                &state.db,
                NewStudent {
                    identity,
                    student_number: payload.student_number,
                    major: payload.major,
                    year_level: payload.year_level,
                },
            )
            .await?
        }
        UserRole::Professor => {
            let payload = req
                .professor
                .ok_or_else(|| ApiError::BadRequest("professor payload required".to_string()))?;
            AccountService::register_professor(
                &state.db,
                NewProfessor {
                    identity,
                    employee_number: payload.employee_number,
                    department: payload.department,
                    position: payload.position,
                },
            )
            .await?
        }
        UserRole::Admin => AccountService::register_admin(&state.db, identity).await?,
    };

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: user_id.to_string(),
        }),
    ))
}

/// Verify a username/password pair
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = UserResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = AccountService::authenticate(&state.db, &req.username, &req.password).await?;
    Ok(Json(user.into()))
}
