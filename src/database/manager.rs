use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Invalid database name: {0}")]
    InvalidDatabaseName(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Connection pool manager for the contact book database
pub struct DatabaseManager {
    pool: RwLock<Option<PgPool>>,
}

impl DatabaseManager {
    fn instance() -> &'static DatabaseManager {
        static INSTANCE: OnceLock<DatabaseManager> = OnceLock::new();
        INSTANCE.get_or_init(|| DatabaseManager {
            pool: RwLock::new(None),
        })
    }

    /// Get the shared connection pool, creating it lazily on first use
    pub async fn pool() -> Result<PgPool, DatabaseError> {
        let manager = Self::instance();

        // Fast path: try read lock
        {
            let pool = manager.pool.read().await;
            if let Some(pool) = pool.as_ref() {
                return Ok(pool.clone());
            }
        }

        let connection_string = Self::build_connection_string()?;
        let db_config = &crate::config::config().database;

        let pool = PgPoolOptions::new()
            .max_connections(db_config.max_connections)
            .acquire_timeout(Duration::from_secs(db_config.connection_timeout))
            .connect(&connection_string)
            .await?;

        {
            let mut slot = manager.pool.write().await;
            *slot = Some(pool.clone());
        }

        info!("Created database pool");
        Ok(pool)
    }

    /// Build the connection string from DATABASE_URL, optionally swapping the
    /// database name in via CONTACT_DB_NAME (validated to prevent injection)
    fn build_connection_string() -> Result<String, DatabaseError> {
        let base = std::env::var("DATABASE_URL")
            .map_err(|_| DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let mut url = url::Url::parse(&base).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if let Ok(name) = std::env::var("CONTACT_DB_NAME") {
            if !Self::is_valid_db_name(&name) {
                return Err(DatabaseError::InvalidDatabaseName(name));
            }
            url.set_path(&format!("/{}", name));
        }
        Ok(url.into())
    }

    /// Apply embedded migrations; run once at startup
    pub async fn migrate() -> Result<(), DatabaseError> {
        let pool = Self::pool().await?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check() -> Result<(), DatabaseError> {
        let pool = Self::pool().await?;
        sqlx::query("SELECT 1").execute(&pool).await?;
        Ok(())
    }

    /// Close the pool (e.g., on shutdown or between tests)
    pub async fn close() {
        let manager = Self::instance();
        let mut slot = manager.pool.write().await;
        if let Some(pool) = slot.take() {
            pool.close().await;
            info!("Closed database pool");
        }
    }

    /// Validate database names to prevent injection: [a-zA-Z_][a-zA-Z0-9_]*
    fn is_valid_db_name(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return false,
        }
        name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}
