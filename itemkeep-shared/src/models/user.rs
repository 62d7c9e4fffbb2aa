/// User model and database operations
///
/// Users are created at signup with a static API token and are never
/// hard-deleted: deletion flips `is_active` and hands the user's items to
/// another user.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     email VARCHAR(320) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     api_token_hash VARCHAR(64) NOT NULL UNIQUE,
///     api_token_prefix VARCHAR(16) NOT NULL,
///     is_active BOOLEAN NOT NULL DEFAULT TRUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// # use itemkeep_shared::models::user::User;
/// # use sqlx::PgPool;
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// if let Some(outcome) = User::soft_delete(&pool, 2).await? {
///     println!(
///         "moved {} items to {:?}",
///         outcome.items_transferred, outcome.successor_id
///     );
/// }
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::debug;

use super::item::Item;

const USER_COLUMNS: &str = "id, email, password_hash, api_token_hash, api_token_prefix, \
                            is_active, created_at, updated_at";

/// User account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID, assigned in increasing order
    pub id: i64,

    /// Email address, unique across all users
    pub email: String,

    /// Argon2id PHC hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// SHA-256 of the API token
    #[serde(skip_serializing)]
    pub api_token_hash: String,

    /// First characters of the API token, for display
    pub api_token_prefix: String,

    /// False once the user has been deleted
    pub is_active: bool,

    /// When the user signed up
    pub created_at: DateTime<Utc>,

    /// When the row last changed
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new user
///
/// Secrets arrive already derived: the password as a PHC hash and the API
/// token as its hash and display prefix.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub api_token_hash: String,
    pub api_token_prefix: String,
}

/// Result of [`User::soft_delete`]
#[derive(Debug, Clone)]
pub struct SoftDeleteOutcome {
    /// The deactivated user
    pub user: User,

    /// User that received the items, None when no other user exists
    pub successor_id: Option<i64>,

    /// Number of items that changed owner
    pub items_transferred: u64,
}

impl User {
    /// Inserts a new, active user
    ///
    /// # Errors
    ///
    /// Returns a unique violation if the email (or, astronomically unlikely,
    /// the token hash) is already taken.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, password_hash, api_token_hash, api_token_prefix)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.api_token_hash)
        .bind(data.api_token_prefix)
        .fetch_one(pool)
        .await
    }

    /// Finds a user by ID, active or not
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Resolves an API token hash to its active owner
    ///
    /// Tokens of soft-deleted users resolve to `None`.
    pub async fn find_active_by_api_token_hash(
        pool: &PgPool,
        api_token_hash: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE api_token_hash = $1 AND is_active"
        ))
        .bind(api_token_hash)
        .fetch_optional(pool)
        .await
    }

    /// Soft-deletes a user, transferring their items first
    ///
    /// In one transaction:
    /// 1. Lock the target row (`None` if it does not exist)
    /// 2. Pick the other user whose ID is smallest as a string, active or
    ///    not (so `10` comes before `2`)
    /// 3. Move all of the target's items to that user
    /// 4. Set `is_active = false` on the target
    ///
    /// With no other user, the items stay where they are.
    pub async fn soft_delete(
        pool: &PgPool,
        id: i64,
    ) -> Result<Option<SoftDeleteOutcome>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // NO KEY UPDATE does not block the KEY SHARE lock taken by the items
        // foreign key when this user is someone else's successor.
        let exists: Option<i64> =
            sqlx::query_scalar("SELECT id FROM users WHERE id = $1 FOR NO KEY UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        if exists.is_none() {
            return Ok(None);
        }

        let successor_id: Option<i64> = sqlx::query_scalar(
            r#"SELECT id FROM users WHERE id <> $1 ORDER BY id::text COLLATE "C" LIMIT 1"#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let items_transferred = match successor_id {
            Some(successor) => Item::transfer_ownership(&mut *tx, id, successor).await?,
            None => 0,
        };

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET is_active = FALSE, updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(
            user_id = id,
            successor_id = ?successor_id,
            items_transferred,
            "User soft-deleted"
        );

        Ok(Some(SoftDeleteOutcome {
            user,
            successor_id,
            items_transferred,
        }))
    }
}
