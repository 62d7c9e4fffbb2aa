/// Database models for ItemKeep
///
/// - `user`: Accounts, API token lookup and soft deletion with item transfer
/// - `item`: Items owned by users
///
/// # Example
///
/// ```no_run
/// use itemkeep_shared::auth::{api_token, password};
/// use itemkeep_shared::models::item::{CreateItem, Item};
/// use itemkeep_shared::models::user::{CreateUser, User};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let token = api_token::generate_api_token();
/// let user = User::create(
///     &pool,
///     CreateUser {
///         email: "deadpool@example.com".to_string(),
///         password_hash: password::hash_password("chimichangas4life")?,
///         api_token_hash: token.hash,
///         api_token_prefix: token.prefix,
///     },
/// )
/// .await?;
///
/// Item::create(
///     &pool,
///     CreateItem {
///         owner_id: user.id,
///         title: "Task A".to_string(),
///         description: None,
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod item;
pub mod user;
