use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteConnection},
    Connection as SqlConnection,
};
use tokio::sync::{Mutex, MutexGuard};

use crate::schema;

/// A thread safe connection to the database
#[derive(Debug, Clone)]
pub struct Connection(Arc<Mutex<SqliteConnection>>);

impl Connection {
    /// Open a connection to the database, creating the
    /// database file if it does not exist yet.
    pub async fn open(filename: &str) -> Result<Self> {
        let opts = SqliteConnectOptions::from_str(filename)?
            .create_if_missing(true)
            .foreign_keys(true);
        let conn = SqliteConnection::connect_with(&opts).await?;
        log::debug!("opened database {}", filename);
        Ok(Self(Arc::new(Mutex::new(conn))))
    }

    /// Open a new in-memory test database with the schema installed.
    /// Every call yields a fresh, empty database.
    pub async fn open_test() -> Result<Self> {
        let conn = Self::open("sqlite::memory:").await?;
        schema::install(&conn).await?;
        Ok(conn)
    }

    /// Acquire the underlying connection
    pub async fn lock(&self) -> MutexGuard<'_, SqliteConnection> {
        self.0.lock().await
    }
}
