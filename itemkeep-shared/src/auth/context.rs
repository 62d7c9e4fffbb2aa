/// Caller resolution from the `X-API-TOKEN` header
///
/// [`authenticate`] turns request headers into an [`AuthContext`] for the
/// active user owning the token. The HTTP layer decides how an
/// [`AuthError`] is rendered; every variant except `DatabaseError` is meant
/// to become a 401.
///
/// # Example
///
/// ```no_run
/// use axum::http::HeaderMap;
/// use itemkeep_shared::auth::context::authenticate;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool, headers: HeaderMap) {
/// match authenticate(&pool, &headers).await {
///     Ok(auth) => println!("user {}", auth.user_id),
///     Err(e) => println!("rejected: {}", e),
/// }
/// # }
/// ```

use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::debug;

use super::api_token::{display_prefix, hash_api_token, validate_api_token_format};
use crate::models::user::User;

/// Header carrying the caller's API token
pub const API_TOKEN_HEADER: &str = "x-api-token";

/// Authenticated caller, added to request extensions
///
/// ```
/// use axum::Extension;
/// use itemkeep_shared::auth::context::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("User: {} <{}>", auth.user_id, auth.email)
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: i64,

    /// Authenticated user's email
    pub email: String,

    /// Display prefix of the presented token
    pub token_prefix: String,
}

impl AuthContext {
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            token_prefix: user.api_token_prefix.clone(),
        }
    }
}

/// Error type for token authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No `X-API-TOKEN` header
    #[error("Missing API token")]
    MissingCredentials,

    /// Header present but not a usable token
    #[error("Invalid API token: {0}")]
    InvalidToken(String),

    /// Lookup failed
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Extracts the raw token from the request headers
pub fn extract_api_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(API_TOKEN_HEADER)
        .ok_or(AuthError::MissingCredentials)?;

    let token = value
        .to_str()
        .map_err(|_| AuthError::InvalidToken("header is not valid ASCII".to_string()))?
        .trim();

    if token.is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    Ok(token)
}

/// Resolves request headers to the active user owning the token
///
/// Malformed tokens are rejected before touching the database.
pub async fn authenticate(pool: &PgPool, headers: &HeaderMap) -> Result<AuthContext, AuthError> {
    let token = extract_api_token(headers)?;

    if !validate_api_token_format(token) {
        return Err(AuthError::InvalidToken("malformed token".to_string()));
    }

    let user = User::find_active_by_api_token_hash(pool, &hash_api_token(token))
        .await?
        .ok_or_else(|| {
            debug!(token_prefix = %display_prefix(token), "Unknown or inactive API token");
            AuthError::InvalidToken("unknown token".to_string())
        })?;

    Ok(AuthContext::from_user(&user))
}
