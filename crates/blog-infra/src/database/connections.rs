use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the embedded SQLite store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite URL, e.g. `sqlite://blog.db?mode=rwc` or `sqlite::memory:`.
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://blog.db?mode=rwc".to_string(),
            max_connections: 10,
            min_connections: 1,
        }
    }
}

impl DatabaseConfig {
    /// A private in-memory database. A single pooled connection keeps the
    /// data alive for the lifetime of the pool.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
        }
    }
}

/// Open the connection pool that every repository shares.
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, DbErr> {
    tracing::info!("Initializing database connection...");

    let mut opts = ConnectOptions::new(&config.url);
    opts.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(true);

    let conn = Database::connect(opts).await?;
    tracing::info!(pool = config.max_connections, "Database connected");

    Ok(conn)
}
