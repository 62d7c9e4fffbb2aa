/// Request extractors that reject with [`ApiError`]
///
/// Thin wrappers over Axum's `Json`, `Path` and `Query`. A malformed body,
/// path or query string produces the usual JSON error body instead of
/// Axum's plain-text rejection.
///
/// ```
/// use itemkeep_api::error::ApiResult;
/// use itemkeep_api::extract::{AppJson, AppPath};
/// use axum::Json;
///
/// async fn echo(AppPath(id): AppPath<i64>, AppJson(body): AppJson<String>) -> ApiResult<Json<String>> {
///     Ok(Json(format!("{}: {}", id, body)))
/// }
/// ```

use crate::error::ApiError;
use axum::extract::{FromRequest, FromRequestParts};

/// JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// Path parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);

/// Query string parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct AppQuery<T>(pub T);
