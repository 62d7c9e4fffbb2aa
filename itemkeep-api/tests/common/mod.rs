/// Common test utilities for integration tests
///
/// Every `TestContext` owns a freshly created database with the schema
/// applied, so user IDs start from 1 in each test. Tests are skipped when
/// DATABASE_URL is not set.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use itemkeep_api::app::{build_router, AppState};
use itemkeep_api::config::Config;
use itemkeep_shared::db::migrations::{ensure_database_exists, run_migrations};
use itemkeep_shared::db::pool::{close_pool, create_pool};
use serde_json::{json, Value};
use sqlx::migrate::MigrateDatabase;
use sqlx::{PgPool, Postgres};
use tower::ServiceExt;
use uuid::Uuid;

/// Test context: isolated database plus a router over it
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    database_url: String,
}

/// A signed-up user as seen by a client
pub struct TestUser {
    pub id: i64,
    pub email: String,
    pub token: String,
}

impl TestContext {
    /// Returns `None` when no database is configured
    pub async fn new() -> Option<Self> {
        let Ok(base_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping API integration test");
            return None;
        };

        let database_url = isolated_database_url(&base_url);
        ensure_database_exists(&database_url)
            .await
            .expect("Failed to create test database");

        let url = database_url.clone();
        let config = Config::from_lookup(move |key| match key {
            "DATABASE_URL" => Some(url.clone()),
            "DATABASE_MAX_CONNECTIONS" => Some("5".to_string()),
            _ => None,
        })
        .expect("Failed to build test config");

        let db = create_pool(config.pool_config())
            .await
            .expect("Failed to connect to test database");
        run_migrations(&db).await.expect("Failed to apply schema");

        let app = build_router(AppState::new(db.clone()));

        Some(Self {
            db,
            app,
            database_url,
        })
    }

    /// Sends a request and returns the status with the parsed JSON body
    /// (`Value::Null` when the body is empty or not JSON)
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("X-API-TOKEN", token);
        }

        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    /// Signs up a user and returns its id and token
    pub async fn signup(&self, email: &str) -> TestUser {
        let (status, body) = self
            .request(
                "POST",
                "/users/",
                None,
                Some(json!({ "email": email, "password": "chimichangas4life" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "signup failed: {}", body);

        TestUser {
            id: body["id"].as_i64().expect("signup returns an id"),
            email: email.to_string(),
            token: body["api_token"]
                .as_str()
                .expect("signup returns a token")
                .to_string(),
        }
    }

    /// Creates an item for `owner_id` using `token`
    pub async fn create_item(&self, token: &str, owner_id: i64, title: &str) -> Value {
        let (status, body) = self
            .request(
                "POST",
                &format!("/users/{}/items/", owner_id),
                Some(token),
                Some(json!({ "title": title, "description": format!("{} details", title) })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "item creation failed: {}", body);
        body
    }

    /// Drops the test database
    pub async fn cleanup(self) {
        drop(self.app);
        close_pool(self.db).await;
        let _ = Postgres::drop_database(&self.database_url).await;
    }
}

/// Swaps the database name in a connection URL for a unique one
fn isolated_database_url(base_url: &str) -> String {
    let (location, query) = match base_url.split_once('?') {
        Some((location, query)) => (location, Some(query)),
        None => (base_url, None),
    };
    let (server, _) = location
        .rsplit_once('/')
        .expect("DATABASE_URL must include a database name");

    let name = format!("itemkeep_api_test_{}", Uuid::new_v4().simple());
    match query {
        Some(query) => format!("{}/{}?{}", server, name, query),
        None => format!("{}/{}", server, name),
    }
}

/// Titles of a JSON array of items, in response order
pub fn titles(items: &Value) -> Vec<String> {
    items
        .as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|item| item["title"].as_str().unwrap_or_default().to_string())
        .collect()
}
