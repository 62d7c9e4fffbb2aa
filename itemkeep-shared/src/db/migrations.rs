/// Schema bootstrap
///
/// The schema lives in `migrations/` at the workspace root and is embedded
/// into the binary at compile time. There is a single bootstrap script; the
/// sqlx migrator records it so repeated startups are no-ops.
///
/// # Example
///
/// ```no_run
/// use itemkeep_shared::db::migrations::{ensure_database_exists, run_migrations};
/// use itemkeep_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let url = std::env::var("DATABASE_URL")?;
/// ensure_database_exists(&url).await?;
///
/// let pool = create_pool(DatabaseConfig { url, ..Default::default() }).await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::{migrate::MigrateDatabase, postgres::PgPool, Postgres};
use tracing::{debug, info, warn};

/// Applies the embedded schema if it has not been applied yet
///
/// # Errors
///
/// Returns an error if a script fails or if the recorded checksum no longer
/// matches the embedded script.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Applying database schema");

    match sqlx::migrate!("../migrations").run(pool).await {
        Ok(()) => {
            info!("Database schema is up to date");
            Ok(())
        }
        Err(e) => {
            warn!("Schema bootstrap failed: {}", e);
            Err(e)
        }
    }
}

/// Creates the database named in `database_url` when it is missing
///
/// Used by local development and the integration tests; production
/// databases are provisioned ahead of time.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    if Postgres::database_exists(database_url).await? {
        debug!("Database already exists");
        return Ok(());
    }

    info!("Database does not exist, creating it");
    Postgres::create_database(database_url).await?;
    info!("Database created successfully");

    Ok(())
}
