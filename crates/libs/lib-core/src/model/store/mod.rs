//! # Database Store
//!
//! Database connection pool, embedded migrations, and repository implementations.

// region: --- Modules
pub mod models;
pub mod user_repository;
pub mod category_repository;
pub mod record_repository;
// endregion: --- Modules

// region: --- Re-exports
pub use category_repository::CategoryRepository;
pub use record_repository::RecordRepository;
pub use user_repository::UserRepository;
// endregion: --- Re-exports

// region: --- Types and Functions
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use tracing::info;

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Schema migrations from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../../migrations");

/// Create a new SQLite connection pool for `database_url`.
///
/// File databases get their parent directory created. In-memory databases
/// are limited to a single connection, since every SQLite connection to
/// `:memory:` opens a separate database.
pub async fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let options = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true);

    let in_memory = database_url.contains(":memory:");
    if !in_memory {
        if let Some(parent) = Path::new(options.get_filename()).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
                info!("Created database directory: {:?}", parent);
            }
        }
    }

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };
    let pool = pool_options.connect_with(options).await?;

    Ok(pool)
}

/// Apply all pending migrations.
pub async fn run_migrations(pool: &DbPool) -> anyhow::Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}
// endregion: --- Types and Functions
