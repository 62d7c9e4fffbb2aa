/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use itemkeep_api::{app::AppState, config::Config};
/// use itemkeep_shared::db::pool::create_pool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(config.pool_config()).await?;
/// let app = itemkeep_api::app::build_router(AppState::new(pool));
///
/// let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::middleware::auth::require_api_token;
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// Cloned into every handler through Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
}

impl AppState {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

/// Builds the complete Axum router
///
/// ```text
/// /
/// ├── GET    /health               # public
/// ├── POST   /users/               # public signup
/// └── (X-API-TOKEN required)
///     ├── GET    /users/:id
///     ├── DELETE /users/:id        # soft delete + item transfer
///     ├── POST   /users/:id/items/
///     ├── GET    /me/items
///     └── GET    /items/
/// ```
///
/// The token check is a route layer, so it runs before path extraction and
/// before any handler: an unauthenticated request gets 401 even when the
/// target user does not exist.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/users/", post(routes::users::create_user));

    let protected_routes = Router::new()
        .route(
            "/users/:id",
            get(routes::users::get_user).delete(routes::users::delete_user),
        )
        .route("/users/:id/items/", post(routes::items::create_item_for_user))
        .route("/me/items", get(routes::items::list_my_items))
        .route("/items/", get(routes::items::list_items))
        .route_layer(from_fn_with_state(state.clone(), require_api_token));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
