//! User handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use common::{AppError, AppResult};
use domain::{User, UserDraft, UserId};

use crate::extractors::{UserIdQuery, ValidatedJson};
use crate::service::{CreateOutcome, UpdateOutcome};
use crate::state::AppState;

/// User create/replace request
#[derive(Deserialize, Validate, ToSchema)]
pub struct UserRequest {
    /// First name
    #[serde(default)]
    #[schema(example = "John")]
    pub name: String,
    /// Last name
    #[serde(default)]
    #[schema(example = "Doe")]
    pub surname: String,
    /// Date of birth, `YYYY-MM-DD` or an RFC 3339 timestamp
    #[serde(default, deserialize_with = "domain::deserialize_birthday")]
    #[schema(example = "1990-05-17")]
    pub birthday: Option<NaiveDate>,
    /// Login email, unique across users
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    #[schema(example = "john.doe@example.com")]
    pub email: String,
    /// Plain-text password
    #[serde(default)]
    #[schema(example = "StrongPassword123!")]
    pub password: String,
}

impl From<UserRequest> for UserDraft {
    fn from(req: UserRequest) -> Self {
        UserDraft {
            first_name: req.name,
            last_name: req.surname,
            birthday: req.birthday,
            login: req.email,
            password: req.password,
        }
    }
}

/// Create user response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateUserResponse {
    /// Id assigned by the store
    #[schema(example = 1)]
    pub id: UserId,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", post(create_user).get(get_user).put(update_user))
}

fn login_taken(email: &str) -> AppError {
    AppError::conflict(format!("User with email {}", email))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = UserRequest,
    responses(
        (status = 200, description = "User created", body = CreateUserResponse),
        (status = 400, description = "Invalid body, invalid email or password, or email already exists"),
        (status = 500, description = "Internal error")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserRequest>,
) -> AppResult<Json<CreateUserResponse>> {
    let email = payload.email.clone();

    match state.user_service.create_user(payload.into()).await? {
        CreateOutcome::Created(id) => Ok(Json(CreateUserResponse { id })),
        CreateOutcome::LoginTaken => Err(login_taken(&email)),
    }
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(
        ("id" = u64, Query, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile with masked password", body = User),
        (status = 400, description = "Missing or invalid id, or user does not exist"),
        (status = 500, description = "Internal error")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    UserIdQuery(id): UserIdQuery,
) -> AppResult<Json<User>> {
    state
        .user_service
        .get_user(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("User with id {}", id)))
}

/// Replace every field of a user
#[utoipa::path(
    put,
    path = "/users",
    tag = "Users",
    params(
        ("id" = u64, Query, description = "User ID")
    ),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated"),
        (status = 400, description = "Missing or invalid id, invalid body, or email already exists"),
        (status = 500, description = "Internal error")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    UserIdQuery(id): UserIdQuery,
    ValidatedJson(payload): ValidatedJson<UserRequest>,
) -> AppResult<StatusCode> {
    let email = payload.email.clone();

    match state.user_service.update_user(id, payload.into()).await? {
        UpdateOutcome::Updated => Ok(StatusCode::OK),
        UpdateOutcome::LoginTaken => Err(login_taken(&email)),
    }
}
