/// User endpoints
///
/// # Endpoints
///
/// - `POST /users/` - Sign up (public)
/// - `GET /users/:id` - Fetch any user (token required)
/// - `DELETE /users/:id` - Soft-delete a user and hand their items over (token required)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{AppJson, AppPath},
};
use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use itemkeep_shared::{
    auth::{api_token, context::AuthContext, password},
    models::{
        item::Item,
        user::{CreateUser, User},
    },
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use validator::Validate;

/// Signup request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Plaintext password, hashed before storage
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// User as returned by the API, with the items they currently own
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub is_active: bool,

    /// Leading characters of the user's API token
    pub api_token_prefix: String,

    pub created_at: DateTime<Utc>,
    pub items: Vec<Item>,
}

impl UserResponse {
    pub fn new(user: User, items: Vec<Item>) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_active: user.is_active,
            api_token_prefix: user.api_token_prefix,
            created_at: user.created_at,
            items,
        }
    }
}

/// Signup response
///
/// The only response that ever carries the plaintext token.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserResponse {
    #[serde(flatten)]
    pub user: UserResponse,

    /// Value for the `X-API-TOKEN` header
    pub api_token: String,
}

/// Sign up
///
/// ```text
/// POST /users/
/// Content-Type: application/json
///
/// { "email": "deadpool@example.com", "password": "chimichangas4life" }
/// ```
///
/// # Errors
///
/// - `409 Conflict`: Email already registered
/// - `422 Unprocessable Entity`: Validation failed
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateUserRequest>,
) -> ApiResult<Json<CreateUserResponse>> {
    req.validate()?;

    let plaintext_password = req.password;
    let password_hash =
        tokio::task::spawn_blocking(move || password::hash_password(&plaintext_password))
            .await
            .map_err(|e| ApiError::InternalError(format!("Password hashing task failed: {}", e)))??;

    let token = api_token::generate_api_token();

    let user = User::create(
        &state.db,
        CreateUser {
            email: req.email,
            password_hash,
            api_token_hash: token.hash,
            api_token_prefix: token.prefix,
        },
    )
    .await?;

    info!(user_id = user.id, token_prefix = %user.api_token_prefix, "User created");

    Ok(Json(CreateUserResponse {
        user: UserResponse::new(user, Vec::new()),
        api_token: token.plaintext,
    }))
}

/// Fetch a user by ID
///
/// Any authenticated caller may read any user, active or not.
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid API token
/// - `404 Not Found`: No user with this ID
pub async fn get_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<UserResponse>> {
    debug!(caller_id = auth.user_id, user_id = id, "Fetching user");

    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let items = Item::list_by_owner(&state.db, user.id).await?;

    Ok(Json(UserResponse::new(user, items)))
}

/// Delete a user
///
/// Moves the user's items to the other user whose ID sorts first as a
/// string, then marks the user inactive. The record is kept and returned
/// with `is_active: false`. Any authenticated caller may delete any user.
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid API token (checked first)
/// - `404 Not Found`: No user with this ID
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Json<UserResponse>> {
    let outcome = User::soft_delete(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    info!(
        caller_id = auth.user_id,
        user_id = id,
        successor_id = ?outcome.successor_id,
        items_transferred = outcome.items_transferred,
        "User deleted"
    );

    let items = Item::list_by_owner(&state.db, id).await?;

    Ok(Json(UserResponse::new(outcome.user, items)))
}
