//! Database connection management
//!
//! One connection per process. It is opened before any command runs and
//! released when the `Database` is closed or dropped.

use crate::config::{Config, DatabaseLocation};
use crate::error::{ExpenseError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Name of the one table this tool owns
pub const TABLE_NAME: &str = "expenses";

const CREATE_TABLE: &str = r#"
    CREATE TABLE expenses (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        amount      NUMERIC(6,2) NOT NULL CHECK (amount >= 0.01 AND amount < 10000),
        memo        TEXT NOT NULL,
        created_on  DATE NOT NULL
    )
"#;

/// The expense store: owns the connection to the expenses database
pub struct Database {
    pub(crate) conn: SqliteConnection,
    location: DatabaseLocation,
}

impl Database {
    /// Open the database named by the configuration
    pub async fn connect(config: &Config) -> Result<Self> {
        match &config.database {
            DatabaseLocation::File(path) => Self::open(path).await,
            DatabaseLocation::Memory => Self::open_in_memory().await,
        }
    }

    /// Open (or create) a database file and make sure the schema exists
    ///
    /// # Arguments
    /// * `db_path` - Path to the SQLite database file
    ///
    /// # Returns
    /// * `Ok(Database)` - Connected, with the expenses table in place
    /// * `Err(ExpenseError::Connection)` - If the file can't be opened or bootstrapped
    pub async fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                ExpenseError::Connection(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true)
            .disable_statement_logging();

        Self::establish(options, DatabaseLocation::File(db_path)).await
    }

    /// Open a private in-memory database
    ///
    /// Everything is gone once the value is dropped. Used by tests and by
    /// `EXPENSES_DATABASE=:memory:`.
    pub async fn open_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| ExpenseError::Connection(e.to_string()))?
            .disable_statement_logging();

        Self::establish(options, DatabaseLocation::Memory).await
    }

    async fn establish(options: SqliteConnectOptions, location: DatabaseLocation) -> Result<Self> {
        let conn = options
            .connect()
            .await
            .map_err(|e| ExpenseError::Connection(format!("{}: {}", location, e)))?;

        let mut db = Self { conn, location };

        db.initialize_schema()
            .await
            .map_err(|e| ExpenseError::Connection(format!("schema setup failed: {}", e)))?;

        Ok(db)
    }

    /// Create the expenses table unless the catalog already lists it
    ///
    /// Safe to run on every start.
    async fn initialize_schema(&mut self) -> Result<()> {
        if self.table_exists().await? {
            debug!(location = %self.location, "expenses table already present");
            return Ok(());
        }

        sqlx::query(CREATE_TABLE).execute(&mut self.conn).await?;
        debug!(location = %self.location, "created expenses table");

        Ok(())
    }

    /// Ask sqlite_master whether the expenses table exists
    pub async fn table_exists(&mut self) -> Result<bool> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?")
                .bind(TABLE_NAME)
                .fetch_one(&mut self.conn)
                .await?;

        Ok(count == 1)
    }

    /// Where this store keeps its data
    pub fn location(&self) -> &DatabaseLocation {
        &self.location
    }

    /// Close the connection
    ///
    /// Dropping the value releases it too; this just does it cleanly.
    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_database_creation() {
        let db = Database::open_in_memory().await;
        assert!(db.is_ok());
    }

    #[tokio::test]
    async fn test_schema_initialization() {
        let mut db = Database::open_in_memory().await.unwrap();
        assert!(db.table_exists().await.unwrap());

        let result: std::result::Result<(i64,), sqlx::Error> =
            sqlx::query_as("SELECT COUNT(*) FROM expenses")
                .fetch_one(&mut db.conn)
                .await;

        assert_eq!(result.unwrap().0, 0);
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let mut db = Database::open_in_memory().await.unwrap();
        db.initialize_schema().await.unwrap();
        db.initialize_schema().await.unwrap();
        assert!(db.table_exists().await.unwrap());
    }

    #[tokio::test]
    async fn test_reopen_keeps_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("expenses.db");

        let mut db = Database::open(&path).await.unwrap();
        db.add("12.50".parse().unwrap(), "lunch").await.unwrap();
        db.close().await.unwrap();

        let mut db = Database::open(&path).await.unwrap();
        assert_eq!(db.count().await.unwrap(), 1);
        assert_eq!(db.location(), &DatabaseLocation::File(path));
    }

    #[tokio::test]
    async fn test_unopenable_path_is_connection_failure() {
        let dir = TempDir::new().unwrap();
        // a directory can't be opened as a database file
        let err = Database::open(dir.path()).await.err().unwrap();
        assert!(matches!(err, ExpenseError::Connection(_)));
    }

    #[tokio::test]
    async fn test_connect_from_config() {
        let config = Config {
            database: DatabaseLocation::Memory,
        };
        let mut db = Database::connect(&config).await.unwrap();
        assert_eq!(db.count().await.unwrap(), 0);
    }
}
