/// Item endpoints
///
/// All three require a valid `X-API-TOKEN`.
///
/// - `POST /users/:id/items/` - Create an item owned by the path user
/// - `GET /me/items` - Items owned by the caller
/// - `GET /items/` - Every item, paginated

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{AppJson, AppPath, AppQuery},
};
use axum::{extract::State, Extension, Json};
use itemkeep_shared::{
    auth::context::AuthContext,
    models::{
        item::{CreateItem, Item},
        user::User,
    },
};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

/// Largest page `GET /items/` will return
pub const MAX_PAGE_SIZE: i64 = 100;

/// Item creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateItemRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Query parameters for `GET /items/`
#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,

    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    MAX_PAGE_SIZE
}

impl Pagination {
    /// Returns `(limit, offset)` ready for the query
    fn bounds(&self) -> ApiResult<(i64, i64)> {
        if self.skip < 0 {
            return Err(ApiError::BadRequest("skip must not be negative".to_string()));
        }
        if self.limit < 1 {
            return Err(ApiError::BadRequest("limit must be at least 1".to_string()));
        }
        Ok((self.limit.min(MAX_PAGE_SIZE), self.skip))
    }
}

/// Create an item for a user
///
/// The item is recorded against the user in the path, whoever the caller is.
///
/// ```text
/// POST /users/2/items/
/// X-API-TOKEN: ik_...
///
/// { "title": "Task A", "description": "first" }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid API token
/// - `404 Not Found`: No user with this ID
/// - `422 Unprocessable Entity`: Title empty or too long
pub async fn create_item_for_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppPath(user_id): AppPath<i64>,
    AppJson(req): AppJson<CreateItemRequest>,
) -> ApiResult<Json<Item>> {
    req.validate()?;

    if User::find_by_id(&state.db, user_id).await?.is_none() {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    let item = Item::create(
        &state.db,
        CreateItem {
            owner_id: user_id,
            title: req.title,
            description: req.description,
        },
    )
    .await?;

    info!(
        caller_id = auth.user_id,
        owner_id = user_id,
        item_id = item.id,
        "Item created"
    );

    Ok(Json(item))
}

/// Items owned by the caller, in ID order
pub async fn list_my_items(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Item>>> {
    let items = Item::list_by_owner(&state.db, auth.user_id).await?;
    Ok(Json(items))
}

/// All items across owners
///
/// `skip` defaults to 0 and `limit` to 100; larger limits are capped.
pub async fn list_items(
    State(state): State<AppState>,
    AppQuery(page): AppQuery<Pagination>,
) -> ApiResult<Json<Vec<Item>>> {
    let (limit, offset) = page.bounds()?;
    let items = Item::list(&state.db, limit, offset).await?;
    Ok(Json(items))
}
