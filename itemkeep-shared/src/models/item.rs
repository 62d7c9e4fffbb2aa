/// Item model and database operations
///
/// Items belong to exactly one user through `owner_id`. Ownership changes
/// only in bulk, when the owner is soft-deleted (see
/// [`User::soft_delete`](super::user::User::soft_delete)).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE items (
///     id BIGSERIAL PRIMARY KEY,
///     title VARCHAR(200) NOT NULL,
///     description TEXT,
///     owner_id BIGINT NOT NULL REFERENCES users(id) ON DELETE RESTRICT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

/// An item owned by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    /// Unique item ID
    pub id: i64,

    /// Short title
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Current owner; always references an existing (possibly inactive) user
    pub owner_id: i64,

    /// When the item was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItem {
    /// User the item is recorded against
    pub owner_id: i64,

    /// Item title
    pub title: String,

    /// Optional description
    pub description: Option<String>,
}

impl Item {
    /// Inserts a new item
    ///
    /// # Errors
    ///
    /// Fails with a foreign key violation if `owner_id` does not reference a
    /// user.
    pub async fn create(pool: &PgPool, data: CreateItem) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (title, description, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, owner_id, created_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.owner_id)
        .fetch_one(pool)
        .await
    }

    /// Lists every item owned by `owner_id`, oldest first
    pub async fn list_by_owner(pool: &PgPool, owner_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Item>(
            r#"
            SELECT id, title, description, owner_id, created_at
            FROM items
            WHERE owner_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await
    }

    /// Lists items across all owners with offset pagination
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Item>(
            r#"
            SELECT id, title, description, owner_id, created_at
            FROM items
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Moves every item owned by `from_owner` to `to_owner`
    ///
    /// Takes a connection so it can run inside the caller's transaction.
    /// Returns the number of items moved.
    pub async fn transfer_ownership(
        conn: &mut PgConnection,
        from_owner: i64,
        to_owner: i64,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE items SET owner_id = $2 WHERE owner_id = $1")
            .bind(from_owner)
            .bind(to_owner)
            .execute(conn)
            .await?;

        Ok(result.rows_affected())
    }
}
