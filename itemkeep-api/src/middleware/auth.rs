/// API token authentication middleware
///
/// Resolves the caller from the `X-API-TOKEN` header and adds an
/// [`AuthContext`] to the request extensions. Rejections go through
/// [`ApiError`], so they share the JSON error body of every other failure.
///
/// # Errors
///
/// - 401 Unauthorized: header missing, malformed, unknown, or the token of a
///   deleted user
/// - 500 Internal Server Error: token lookup failed

use crate::{app::AppState, error::ApiError};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use itemkeep_shared::auth::context::authenticate;
use tracing::debug;

pub async fn require_api_token(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth = authenticate(&state.db, request.headers()).await?;

    debug!(
        user_id = auth.user_id,
        token_prefix = %auth.token_prefix,
        "Request authenticated"
    );
    request.extensions_mut().insert(auth);

    Ok(next.run(request).await)
}
