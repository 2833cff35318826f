//! `SQLite` pool construction and schema migration.

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use crate::error::StorageError;

/// Pool size used by [`Config::new`].
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings for opening the persons/locations database.
#[derive(Debug, Clone)]
pub struct Config {
    /// `SQLite` connection URL, e.g. `sqlite:udaconnect.db` or `sqlite::memory:`.
    pub database_url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
}

impl Config {
    /// Settings for `database_url` with the default pool size.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    /// Open the pool and bring the schema up to date.
    ///
    /// The database file is created when missing. Foreign keys are enforced
    /// and file-backed databases use the WAL journal.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the URL is invalid, the database cannot
    /// be opened, or a migration fails.
    pub async fn build(self) -> Result<Database, StorageError> {
        let options = SqliteConnectOptions::from_str(&self.database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        // a shared in-memory database is dropped with its last connection
        let pool = SqlitePoolOptions::new()
            .max_connections(self.max_connections.max(1))
            .min_connections(1)
            .connect_with(options)
            .await?;

        Database::migrate(pool, &self.database_url).await
    }
}

/// An open, migrated database.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    async fn migrate(pool: SqlitePool, database_url: &str) -> Result<Self, StorageError> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!(database_url, "database ready");
        Ok(Self { pool })
    }

    /// Borrow the connection pool, for handing to repositories.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn table_names(db: &Database) -> Vec<String> {
        sqlx::query_scalar(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' AND name != '_sqlx_migrations' \
             ORDER BY name",
        )
        .fetch_all(db.pool())
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn should_create_persons_and_locations_tables() {
        let db = Config::new("sqlite::memory:").build().await.unwrap();
        assert_eq!(table_names(&db).await, ["locations", "persons"]);
    }

    #[tokio::test]
    async fn should_share_schema_across_pooled_connections() {
        let db = Config::new("sqlite::memory:").build().await.unwrap();

        let mut first = db.pool().acquire().await.unwrap();
        let mut second = db.pool().acquire().await.unwrap();
        for conn in [&mut *first, &mut *second] {
            let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM persons")
                .fetch_one(conn)
                .await
                .unwrap();
            assert_eq!(count, 0);
        }
    }

    #[tokio::test]
    async fn should_enforce_location_owner_foreign_key() {
        let db = Config::new("sqlite::memory:").build().await.unwrap();

        let result = sqlx::query(
            "INSERT INTO locations (id, person_id, latitude, longitude, creation_time) \
             VALUES ('l1', 'nobody', 0.0, 0.0, 1577836800000000)",
        )
        .execute(db.pool())
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn should_fail_when_database_cannot_be_opened() {
        let config = Config::new("sqlite:/nonexistent-dir/udaconnect.db");
        assert!(config.build().await.is_err());
    }

    #[test]
    fn should_default_pool_size() {
        let config = Config::new("sqlite::memory:");
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }
}
